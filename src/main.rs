//! Command-line front desk.
//!
//! An interactive menu for running the clinic queue board: registering
//! walk-ins, moving patients through their visit, booking appointments
//! and reading the dashboard figures.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use frontdesk::calendar::BookingRequest;
use frontdesk::config::DeskConfig;
use frontdesk::models::{AppointmentStatus, PatientStatus, Priority};
use frontdesk::roster::Medal;
use frontdesk::{FrontDesk, QueueView, SortKey};

#[derive(Debug, Parser)]
#[command(name = "frontdesk", version, about = "Clinic front-desk queue and appointment board")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with an empty queue and appointment book.
    #[arg(long)]
    no_seed: bool,

    /// Run the scripted demo and exit.
    #[arg(long)]
    demo: bool,
}

struct FrontDeskCli {
    desk: FrontDesk,
    view: QueueView,
    running: bool,
}

impl FrontDeskCli {
    fn new(desk: FrontDesk, view: QueueView) -> Self {
        FrontDeskCli {
            desk,
            view,
            running: true,
        }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       CLINIC FRONT DESK");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        println!("\n--- Main Menu ---");
        println!("1. Show queue board");
        println!("2. Filter / sort queue");
        println!("3. Add walk-in patient");
        println!("4. Change patient status");
        println!("5. Change patient priority");
        println!("6. Book appointment");
        println!("7. View appointments for a date");
        println!("8. Complete / cancel appointment");
        println!("9. Analytics");
        println!("10. Doctor rankings");
        println!("11. Run demo");
        println!("0. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(def) => print!("{} [{}]: ", prompt, def),
            None => print!("{}: ", prompt),
        }
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            Ok(default.unwrap_or("").to_string())
        } else {
            Ok(input.to_string())
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<i64>) -> Result<i64> {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref())?;

            if let Ok(value) = input.parse::<i64>() {
                return Ok(value);
            }
            println!("Please enter a valid number");
        }
    }

    fn choose_doctor(&self) -> Result<Option<String>> {
        let doctors = self.desk.roster.doctors();
        for (i, doctor) in doctors.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, doctor.name, doctor.specialization);
        }
        let choice = self.get_int_input("Select doctor", Some(1))?;
        Ok(usize::try_from(choice)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .and_then(|i| doctors.get(i))
            .map(|d| d.name.clone()))
    }

    fn choose_status(&self) -> Result<Option<PatientStatus>> {
        for (i, status) in PatientStatus::ALL.iter().enumerate() {
            println!("  {}. {}", i + 1, status);
        }
        let choice = self.get_int_input("Select status", Some(1))?;
        Ok(usize::try_from(choice)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .and_then(|i| PatientStatus::ALL.get(i).copied()))
    }

    fn show_queue(&self) {
        let ranked = self.desk.queue(&self.view);
        println!(
            "\n--- Queue ({} shown, sorted by {:?} {:?}) ---",
            ranked.len(),
            self.view.sort_key,
            self.view.direction
        );
        if ranked.is_empty() {
            println!("  No patients match the current filters");
            return;
        }

        println!(
            "  {:>3} {:>4}  {:<4} {:<20} {:<12} {:<18} {}",
            "#", "id", "", "Patient", "Status", "Doctor", "Arrived"
        );
        for patient in ranked {
            println!(
                "  {:>3} {:>4}  {:<4} {:<20} {:<12} {:<18} {}",
                patient.queue_number,
                patient.id,
                if patient.priority.is_urgent() { "[!]" } else { "" },
                patient.name,
                patient.status.name(),
                patient.doctor,
                patient.arrival_time.format("%H:%M")
            );
        }
    }

    fn adjust_view(&mut self) -> Result<()> {
        println!("\n--- Filter / Sort ---");
        println!("  1. Name filter");
        println!("  2. Status filter");
        println!("  3. Doctor filter");
        println!("  4. Sort by queue number");
        println!("  5. Sort by name");
        println!("  6. Sort by arrival time");
        println!("  7. Sort by priority");
        println!("  8. Reset filters");

        match self.get_int_input("Select option", Some(8))? {
            1 => {
                self.view.name_filter = self.get_input("Name contains", Some(""))?;
            }
            2 => self.view.status_filter = self.choose_status()?,
            3 => self.view.doctor_filter = self.choose_doctor()?,
            4 => self.view.toggle_sort(SortKey::QueueNumber),
            5 => self.view.toggle_sort(SortKey::Name),
            6 => self.view.toggle_sort(SortKey::ArrivalTime),
            7 => self.view.toggle_sort(SortKey::Priority),
            8 => self.view.reset_filters(),
            _ => println!("Invalid choice"),
        }
        self.show_queue();
        Ok(())
    }

    fn add_walk_in(&mut self) -> Result<()> {
        println!("\n--- Add Walk-in Patient ---");
        let name = self.get_input("Patient name", None)?;
        let Some(doctor) = self.choose_doctor()? else {
            println!("Invalid doctor choice");
            return Ok(());
        };
        let urgent = self.get_input("Urgent? (y/n)", Some("n"))?;
        let priority = if urgent.eq_ignore_ascii_case("y") {
            Priority::Urgent
        } else {
            Priority::Normal
        };

        match self.desk.admit_walk_in(&name, &doctor, priority, Local::now()) {
            Ok(patient) => println!(
                "\n{} has been added to the queue as #{}",
                patient.name, patient.queue_number
            ),
            Err(e) => println!("\nError: {}", e),
        }
        Ok(())
    }

    fn change_status(&mut self) -> Result<()> {
        println!("\n--- Change Patient Status ---");
        let id = self.get_int_input("Patient id", None)?;
        let Some(status) = self.choose_status()? else {
            println!("Invalid status choice");
            return Ok(());
        };
        let result = u32::try_from(id)
            .map_err(|_| frontdesk::DeskError::Validation(format!("bad patient id {}", id)))
            .and_then(|id| self.desk.update_status(id, status));
        match result {
            Ok(()) => println!("\nPatient {} marked as {}", id, status),
            Err(e) => println!("\nError: {}", e),
        }
        Ok(())
    }

    fn change_priority(&mut self) -> Result<()> {
        println!("\n--- Change Patient Priority ---");
        let id = self.get_int_input("Patient id", None)?;
        let priority = self.get_input("Priority (urgent/normal)", Some("urgent"))?;
        let result = u32::try_from(id)
            .map_err(|_| frontdesk::DeskError::Validation(format!("bad patient id {}", id)))
            .and_then(|id| {
                let priority: Priority = priority.parse()?;
                self.desk.update_priority(id, priority)?;
                Ok(priority)
            });
        match result {
            Ok(priority) => println!("\nPatient's priority has been set to {}", priority),
            Err(e) => println!("\nError: {}", e),
        }
        Ok(())
    }

    fn book_appointment(&mut self) -> Result<()> {
        println!("\n--- Book Appointment ---");
        let patient_name = self.get_input("Patient name", None)?;
        let Some(doctor_name) = self.choose_doctor()? else {
            println!("Invalid doctor choice");
            return Ok(());
        };

        let today = Self::today();
        let tomorrow = today.succ_opt().unwrap_or(today).to_string();
        let date_input = self.get_input("Date (YYYY-MM-DD)", Some(tomorrow.as_str()))?;
        let date = match NaiveDate::parse_from_str(&date_input, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                println!("Please enter a date as YYYY-MM-DD");
                return Ok(());
            }
        };

        let slots = self.desk.roster.slots_on(&doctor_name, date);
        if slots.is_empty() {
            println!("\n{} has no slots on {}", doctor_name, date.weekday());
            return Ok(());
        }
        println!("Available slots: {}", slots.join(", "));
        let default_slot = slots[0].clone();
        let slot = self.get_input("Time slot", Some(default_slot.as_str()))?;

        let request = BookingRequest {
            patient_name,
            doctor_name,
            date,
            slot,
        };
        match self.desk.book_appointment(request, today) {
            Ok(apt) => println!(
                "\nAppointment for {} with {} booked for {}",
                apt.patient_name,
                apt.doctor_name,
                apt.start_time.format("%Y-%m-%d %H:%M")
            ),
            Err(e) => println!("\nError: {}", e),
        }
        Ok(())
    }

    fn view_appointments(&self) -> Result<()> {
        let today = Self::today().to_string();
        let date_input = self.get_input("Date (YYYY-MM-DD)", Some(today.as_str()))?;
        let Ok(date) = NaiveDate::parse_from_str(&date_input, "%Y-%m-%d") else {
            println!("Please enter a date as YYYY-MM-DD");
            return Ok(());
        };

        let appointments = self.desk.book.on_date(date);
        if appointments.is_empty() {
            println!("\nNo appointments scheduled for this day.");
            let dates: Vec<String> = self
                .desk
                .book
                .booked_dates()
                .iter()
                .map(|d| d.to_string())
                .collect();
            if !dates.is_empty() {
                println!("Days with appointments: {}", dates.join(", "));
            }
            return Ok(());
        }

        println!("\n--- Appointments for {} ---", date.format("%A, %Y-%m-%d"));
        for apt in appointments {
            println!(
                "  {} - {} with {} ({}) [{}]",
                apt.start_time.format("%H:%M"),
                apt.patient_name,
                apt.doctor_name,
                apt.specialization,
                apt.status
            );
            println!("    ID: {}", apt.id);
        }
        Ok(())
    }

    fn close_appointment(&mut self) -> Result<()> {
        println!("\n--- Complete / Cancel Appointment ---");
        let id_input = self.get_input("Appointment ID", None)?;
        let Ok(id) = Uuid::parse_str(&id_input) else {
            println!("Please enter a full appointment ID");
            return Ok(());
        };
        let status_input = self.get_input("New status (completed/cancelled)", Some("completed"))?;
        let result = status_input
            .parse::<AppointmentStatus>()
            .and_then(|status| self.desk.set_appointment_status(id, status).map(|_| status));
        match result {
            Ok(status) => println!("\nAppointment marked as {}", status),
            Err(e) => println!("\nError: {}", e),
        }
        Ok(())
    }

    fn show_analytics(&self) {
        let today = Self::today();
        let overview = self.desk.overview(today);
        let summary = self.desk.summary(today);

        println!("\n--- Overview ---");
        println!("  Patients in queue:      {}", overview.patients_in_queue);
        println!("  Appointments today:     {}", overview.appointments_today);
        println!("  Doctors available:      {}", overview.doctors_available_today);

        println!("\n--- Today ---");
        println!("  Patients arrived:       {}", summary.patients_today);
        println!("  Appointments:           {}", summary.appointments_today);
        println!("  Completed visits:       {}", summary.completed_today);

        println!("\n--- Peak Hours ---");
        for bucket in self.desk.peak_hours() {
            println!("  {:>2}:00 {}", bucket.hour, "#".repeat(bucket.arrivals));
        }

        println!("\n--- Doctor Workload ---");
        for entry in self.desk.workload() {
            println!(
                "  {:<18} {:<12} {} patients, rated {:.1} ({} reviews)",
                entry.doctor.name,
                entry.doctor.specialization,
                entry.patients,
                entry.doctor.rating,
                entry.doctor.reviews
            );
        }
    }

    fn show_rankings(&self) {
        println!("\n--- Doctor Rankings ---");
        for ranked in self.desk.roster.rankings() {
            let medal = match ranked.medal {
                Some(Medal::Gold) => "gold",
                Some(Medal::Silver) => "silver",
                Some(Medal::Bronze) => "bronze",
                None => "",
            };
            println!(
                "  {}. {:<18} {:.1} ({} reviews) {}",
                ranked.rank, ranked.doctor.name, ranked.doctor.rating, ranked.doctor.reviews, medal
            );
        }
    }

    fn run_demo(&mut self) -> Result<()> {
        println!("\n--- Running Demo ---");
        let now = Local::now();

        let doctor = self
            .desk
            .roster
            .doctors()
            .first()
            .map(|d| d.name.clone())
            .context("the roster has no doctors")?;

        let walk_ins = [
            ("Frank Moore", Priority::Normal),
            ("Gina Hart", Priority::Urgent),
            ("Hugo Park", Priority::Normal),
        ];
        for (name, priority) in walk_ins {
            let patient = self.desk.admit_walk_in(name, &doctor, priority, now)?;
            println!(
                "  Added {} as #{} ({})",
                patient.name, patient.queue_number, patient.priority
            );
        }

        println!("\nQueue board, urgent patients first:");
        self.view = QueueView::default();
        self.show_queue();

        println!("\nNote: Gina Hart is listed ahead of every normal-priority patient,");
        println!("even though she arrived after most of them.");
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        self.print_header();

        while self.running {
            self.print_menu();

            match self.get_int_input("Enter choice", Some(1))? {
                1 => self.show_queue(),
                2 => self.adjust_view()?,
                3 => self.add_walk_in()?,
                4 => self.change_status()?,
                5 => self.change_priority()?,
                6 => self.book_appointment()?,
                7 => self.view_appointments()?,
                8 => self.close_appointment()?,
                9 => self.show_analytics(),
                10 => self.show_rankings(),
                11 => self.run_demo()?,
                0 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
        Ok(())
    }
}

fn init_tracing(config: &DeskConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = DeskConfig::load(args.config.as_deref()).with_context(|| {
        format!(
            "failed to load config from {}",
            args.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;
    if args.no_seed {
        config.seed_demo_data = false;
    }
    init_tracing(&config);

    let desk = FrontDesk::from_config(&config, Local::now().date_naive());
    let mut cli = FrontDeskCli::new(desk, config.initial_view());

    if args.demo {
        return cli.run_demo();
    }
    cli.run()
}
