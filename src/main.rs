use chrono::{Local, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use clinicdesk::application::init::{self, InitOptions};
use clinicdesk::application::records::{NewAppointment, NewDoctor, NewMedicine, NewPatient};
use clinicdesk::application::{
    CalendarRequest, CalendarService, ConfigService, DashboardService, DirectoryQuery,
    MedicinesService, PatientsService, RecordsService, ReportService,
};
use clinicdesk::cli::{
    format_calendar, format_config, format_dashboard, format_medicines, format_patients,
    format_report, AppointmentCommand, Cli, Commands, DirectoryArgs, DoctorCommand,
    MedicineCommand, PatientCommand,
};
use clinicdesk::domain::date_ref::resolve_or_today;
use clinicdesk::error::ClinicError;
use clinicdesk::infrastructure::config::CONFIG_KEYS;
use clinicdesk::infrastructure::{init_logging, FileSystemRepository};
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();

    // Dropping the handle flushes and stops the logger
    let _logger = match init_logging(cli.verbose) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    };

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            log::debug!("event=command status=error code={}", e.exit_code());
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Parse an enum value typed on the command line
fn parse_arg<T: FromStr<Err = String>>(raw: &str) -> Result<T, ClinicError> {
    T::from_str(raw).map_err(ClinicError::InvalidArgument)
}

fn parse_dob(raw: &str) -> Result<NaiveDate, ClinicError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ClinicError::InvalidArgument(format!(
            "Invalid date of birth '{}'. Expected YYYY-MM-DD",
            raw
        ))
    })
}

fn parse_time(raw: &str) -> Result<NaiveTime, ClinicError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| {
        ClinicError::InvalidArgument(format!("Invalid time '{}'. Expected HH:MM (24h)", raw))
    })
}

fn directory_query(args: DirectoryArgs) -> DirectoryQuery {
    DirectoryQuery {
        search: args.search,
        filters: args.filters,
        sort: args.sort,
        page: args.page,
        page_size: args.page_size,
    }
}

fn run(cli: Cli) -> Result<(), ClinicError> {
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Init {
            path,
            name,
            subdomain,
            demo,
        }) => init::init(
            &path,
            &InitOptions {
                name,
                subdomain,
                demo,
            },
        ),
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                println!("{}", format_config(&service.list()?));
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: clinicdesk config [--list | <key> [<value>]]");
                println!("Valid keys: {}", CONFIG_KEYS.join(", "));
                Ok(())
            }
        }
        Some(Commands::Dashboard { date }) => {
            let date = resolve_or_today(date.as_deref(), today)?;
            let service = DashboardService::new(FileSystemRepository::discover()?);
            print!("{}", format_dashboard(&service.show(date, Utc::now())?));
            Ok(())
        }
        Some(Commands::Patients(args)) => {
            let service = PatientsService::new(FileSystemRepository::discover()?);
            println!("{}", format_patients(&service.list(&directory_query(args))?));
            Ok(())
        }
        Some(Commands::Medicines(args)) => {
            let service = MedicinesService::new(FileSystemRepository::discover()?);
            println!("{}", format_medicines(&service.list(&directory_query(args))?));
            Ok(())
        }
        Some(Commands::Calendar { view, date, step }) => {
            let service = CalendarService::new(FileSystemRepository::discover()?);
            let page = service.show(&CalendarRequest { view, date, step }, today)?;
            print!("{}", format_calendar(&page));
            Ok(())
        }
        Some(Commands::Report { kind }) => {
            let service = ReportService::new(FileSystemRepository::discover()?);
            print!("{}", format_report(&service.show(&kind, Utc::now(), today)?));
            Ok(())
        }
        Some(Commands::Patient { command }) => {
            let service = RecordsService::new(FileSystemRepository::discover()?);
            match command {
                PatientCommand::Add {
                    first_name,
                    last_name,
                    chart_id,
                    email,
                    phone,
                    dob,
                    gender,
                    status,
                    doctor,
                } => {
                    let input = NewPatient {
                        first_name,
                        last_name,
                        chart_id,
                        email,
                        phone,
                        date_of_birth: dob.as_deref().map(parse_dob).transpose()?,
                        gender: gender.as_deref().map(parse_arg).transpose()?,
                        status: parse_arg(&status)?,
                        doctor,
                    };
                    let chart_id = service.add_patient(input)?;
                    println!("Added patient #{}", chart_id);
                    Ok(())
                }
            }
        }
        Some(Commands::Doctor { command }) => {
            let service = RecordsService::new(FileSystemRepository::discover()?);
            match command {
                DoctorCommand::Add { name, email, phone } => {
                    let id = service.add_doctor(NewDoctor { name, email, phone })?;
                    println!("Added doctor {}", id);
                    Ok(())
                }
            }
        }
        Some(Commands::Medicine { command }) => {
            let service = RecordsService::new(FileSystemRepository::discover()?);
            match command {
                MedicineCommand::Add {
                    name,
                    brand,
                    form,
                    description,
                } => {
                    let id = service.add_medicine(NewMedicine {
                        name,
                        brand,
                        form,
                        description,
                    })?;
                    println!("Added medicine {}", id);
                    Ok(())
                }
            }
        }
        Some(Commands::Appointment { command }) => {
            let service = RecordsService::new(FileSystemRepository::discover()?);
            match command {
                AppointmentCommand::Add {
                    patient,
                    doctor,
                    date,
                    time,
                    duration,
                    appointment_type,
                    title,
                    notes,
                } => {
                    let day = resolve_or_today(Some(date.as_str()), today)?;
                    let input = NewAppointment {
                        patient_chart_id: patient,
                        doctor,
                        title,
                        start: day.and_time(parse_time(&time)?),
                        duration,
                        appointment_type: parse_arg(&appointment_type)?,
                        notes,
                    };
                    let id = service.add_appointment(input)?;
                    println!("Booked appointment {}", id);
                    Ok(())
                }
                AppointmentCommand::Status { id, status } => {
                    let found = service.set_appointment_status(&id, parse_arg(&status)?)?;
                    println!("Appointment {} is now {}", found, status.trim().to_lowercase());
                    Ok(())
                }
            }
        }
        None => {
            println!("No command given. Run 'clinicdesk --help' for usage.");
            Ok(())
        }
    }
}
