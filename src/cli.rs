use clap::{Args, Parser, Subcommand};

use crate::models::driver::DriverForm;
use crate::models::service_request::{ServiceRequestForm, ServiceType};
use crate::models::status::RequestStatus;

#[derive(Debug, Parser)]
#[command(
    name = "pickup-console",
    about = "Pickup & drop operations console",
    long_about = "Manage vehicle pickup/drop service requests and drivers against the pickup service API.",
    after_help = "Examples:\n  pickup-console login -u admin -p secret -e Asha\n  pickup-console pickups recent\n  pickup-console pickups status 42 DRIVER_ASSIGNED --driver 7"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Sign in and store the session locally")]
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long, help = "Name shown as the creator of new requests (1-15 characters)")]
        employee_name: String,
    },
    #[command(about = "Clear the stored session")]
    Logout,
    #[command(about = "Show the current session")]
    Whoami,
    /// Service requests
    #[command(subcommand)]
    Pickups(PickupCommand),
    /// Drivers
    #[command(subcommand)]
    Drivers(DriverCommand),
}

/// Lista sobre la que opera un comando: hoy o una fecha concreta
#[derive(Debug, Clone, Default, Args)]
pub struct ScopeArgs {
    #[arg(long, help = "Work on the schedule of this date (YYYY-MM-DD) instead of today's created pickups")]
    pub date: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PickupCommand {
    #[command(about = "List pickups created today")]
    Recent,
    #[command(about = "List pickups scheduled for a date (defaults to the last selected date)")]
    ByDate { date: Option<String> },
    #[command(about = "Show the last fetched list without calling the server")]
    Cached,
    #[command(about = "List pickups, status counts and drivers")]
    Board {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    #[command(about = "Show one pickup")]
    Show {
        id: i64,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    #[command(about = "Create a pickup or drop request")]
    Create {
        #[command(flatten)]
        fields: ServiceFields,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    #[command(about = "Edit a request; omitted fields keep their current value")]
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ServiceFields,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    #[command(about = "Delete a request")]
    Delete {
        id: i64,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    #[command(about = "Change the status of a request (admin only)")]
    Status {
        id: i64,
        status: RequestStatus,
        #[arg(long, help = "Driver to assign; required for driver statuses")]
        driver: Option<i64>,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    #[command(about = "Count pickups per status category in the last fetched list")]
    Counts,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServiceFields {
    #[arg(long)]
    pub customer_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub vehicle_number: Option<String>,
    #[arg(long)]
    pub vehicle_model: Option<String>,
    #[arg(long = "type", help = "pickup or drop")]
    pub service_type: Option<ServiceType>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, help = "Local India time, e.g. 2030-01-15T10:30")]
    pub pickup_time: Option<String>,
    #[arg(long)]
    pub created_by: Option<String>,
}

impl ServiceFields {
    /// Aplica los campos indicados sobre un formulario base
    pub fn apply(self, mut form: ServiceRequestForm) -> ServiceRequestForm {
        if let Some(v) = self.customer_name {
            form.customer_name = v;
        }
        if let Some(v) = self.phone {
            form.customer_phone_number = v;
        }
        if self.email.is_some() {
            form.customer_email = self.email;
        }
        if let Some(v) = self.vehicle_number {
            form.vehicle_number = v;
        }
        if self.vehicle_model.is_some() {
            form.vehicle_model = self.vehicle_model;
        }
        if let Some(v) = self.service_type {
            form.service_type = v;
        }
        if let Some(v) = self.location {
            form.service_location = v;
        }
        if self.pickup_time.is_some() {
            form.pickup_time = self.pickup_time;
        }
        if self.created_by.is_some() {
            form.created_by = self.created_by;
        }
        form
    }
}

#[derive(Debug, Subcommand)]
pub enum DriverCommand {
    #[command(about = "List drivers")]
    List,
    #[command(about = "Register a driver")]
    Create {
        #[command(flatten)]
        fields: DriverFields,
    },
    #[command(about = "Update a driver; omitted fields keep their current value")]
    Update {
        id: i64,
        #[command(flatten)]
        fields: DriverFields,
    },
    #[command(about = "Delete a driver")]
    Delete { id: i64 },
}

#[derive(Debug, Clone, Default, Args)]
pub struct DriverFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub license: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub details: Option<String>,
}

impl DriverFields {
    pub fn apply(self, mut form: DriverForm) -> DriverForm {
        if let Some(v) = self.name {
            form.name = v;
        }
        if let Some(v) = self.phone {
            form.phone_number = v;
        }
        if let Some(v) = self.license {
            form.license_number = v;
        }
        if let Some(v) = self.address {
            form.address = v;
        }
        if self.details.is_some() {
            form.other_details = self.details;
        }
        form
    }
}
