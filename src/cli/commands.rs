//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clinicdesk")]
#[command(about = "Clinic management: patients, appointments and reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Search, filter, sort and page options shared by directory pages
#[derive(Args, Debug, Clone)]
pub struct DirectoryArgs {
    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter row as key=value (repeatable, all must match)
    #[arg(short, long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Sort column, optionally with :asc or :desc
    #[arg(long, value_name = "COLUMN[:DIR]")]
    pub sort: Option<String>,

    /// Page number (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default: config page_size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new clinic directory
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Clinic display name
        #[arg(long)]
        name: String,

        /// Unique clinic subdomain (lowercase letters, digits, hyphens)
        #[arg(long)]
        subdomain: String,

        /// Seed demo doctors, patients, appointments and medicines
        #[arg(long)]
        demo: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Home dashboard: stats, today's schedule, recent activity
    Dashboard {
        /// Day to show (e.g., today, tomorrow, next monday, 2025-01-17)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Patients directory
    Patients(DirectoryArgs),

    /// Medicines directory
    Medicines(DirectoryArgs),

    /// Appointments calendar
    Calendar {
        /// month, week or day (default: config default_view)
        #[arg(long)]
        view: Option<String>,

        /// Reference date (e.g., today, last friday, 2025-01-17)
        #[arg(short, long)]
        date: Option<String>,

        /// Move this many months/weeks/days (negative goes back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        step: i32,
    },

    /// Reports: patients, appointments or medicines
    Report {
        /// Report to build
        kind: String,
    },

    /// Manage patients
    Patient {
        #[command(subcommand)]
        command: PatientCommand,
    },

    /// Manage doctors
    Doctor {
        #[command(subcommand)]
        command: DoctorCommand,
    },

    /// Manage medicines
    Medicine {
        #[command(subcommand)]
        command: MedicineCommand,
    },

    /// Manage appointments
    Appointment {
        #[command(subcommand)]
        command: AppointmentCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum PatientCommand {
    /// Register a patient
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Chart id (default: next free id)
        #[arg(long)]
        chart_id: Option<u32>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,

        /// male, female or other
        #[arg(long)]
        gender: Option<String>,

        /// active, inactive or critical
        #[arg(long, default_value = "active")]
        status: String,

        /// Assigned doctor by id, email or name
        #[arg(long)]
        doctor: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DoctorCommand {
    /// Add a doctor
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MedicineCommand {
    /// Add a medicine to the formulary
    Add {
        name: String,

        #[arg(long)]
        brand: Option<String>,

        /// Tablet, Syrup, Capsule, ...
        #[arg(long)]
        form: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AppointmentCommand {
    /// Book an appointment
    Add {
        /// Patient chart id
        #[arg(long)]
        patient: u32,

        /// Doctor by id, email or name
        #[arg(long)]
        doctor: String,

        /// Day of the appointment (e.g., tomorrow, next monday, 2025-01-17)
        #[arg(short, long, default_value = "today")]
        date: String,

        /// Start time (HH:MM)
        #[arg(short, long)]
        time: String,

        /// Length in minutes
        #[arg(long, default_value_t = 30)]
        duration: u32,

        /// general, follow-up or emergency
        #[arg(long = "type", default_value = "general")]
        appointment_type: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Change the status of an appointment
    Status {
        /// Appointment id or unique prefix
        id: String,

        /// pending, completed, cancelled or no-show
        status: String,
    },
}
