use assert_cmd::Command;
use tempfile::TempDir;

pub fn clinicdesk_cmd() -> Command {
    let mut cmd = Command::cargo_bin("clinicdesk").unwrap();
    cmd.env_remove("CLINICDESK_ROOT");
    cmd.env_remove("CLINICDESK_LOG");
    cmd
}

/// Command that runs against the clinic at `temp`
#[allow(dead_code)]
pub fn clinic_cmd(temp: &TempDir) -> Command {
    let mut cmd = clinicdesk_cmd();
    cmd.env("CLINICDESK_ROOT", temp.path());
    cmd
}

/// Empty clinic named Northside
#[allow(dead_code)]
pub fn empty_clinic() -> TempDir {
    let temp = TempDir::new().unwrap();
    clinicdesk_cmd()
        .args(["init", "--name", "Northside", "--subdomain", "northside"])
        .arg(temp.path())
        .assert()
        .success();
    temp
}

/// Clinic seeded with demo doctors, patients, appointments and medicines
#[allow(dead_code)]
pub fn demo_clinic() -> TempDir {
    let temp = TempDir::new().unwrap();
    clinicdesk_cmd()
        .args(["init", "--name", "Northside", "--subdomain", "northside", "--demo"])
        .arg(temp.path())
        .assert()
        .success();
    temp
}
