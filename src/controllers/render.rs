//! Salida por consola: tablas, badges de estado y errores

use colored::*;

use crate::models::driver::Driver;
use crate::models::service_request::ServiceRequest;
use crate::models::status::StatusCategory;
use crate::services::pickup_service::CachedPickupList;
use crate::services::status_policy::StatusCounts;
use crate::utils::datetime::format_display;
use crate::utils::errors::AppError;

/// Badge coloreado para una categoría de estado
pub fn badge(category: StatusCategory) -> ColoredString {
    let label = format!(" {} ", category.as_str());
    match hex_rgb(category.display_color()) {
        Some((r, g, b)) => label.on_truecolor(r, g, b).black(),
        None => label.normal(),
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

pub fn pickup_line(request: &ServiceRequest) -> String {
    let driver = request
        .assigned_driver
        .as_ref()
        .map(|d| d.name.as_str())
        .unwrap_or("-");
    format!(
        "{:>5}  {}  {:<6} {:<20} {:<12} {}  {} -> {}  driver: {}",
        request.id,
        badge(request.category()),
        request.service_type.label(),
        request.customer_name,
        request.vehicle_number,
        format_display(&request.pickup_time),
        request.from_address(),
        request.to_address(),
        driver
    )
}

pub fn pickup_list(list: &CachedPickupList) {
    println!("{}", list.scope.to_string().bright_blue().bold());
    println!(
        "{}",
        format!("Fetched at {}", format_display(&list.fetched_at)).dimmed()
    );
    if list.items.is_empty() {
        println!("{}", "No pickups found.".yellow());
        return;
    }
    for request in &list.items {
        println!("{}", pickup_line(request));
    }
}

pub fn pickup_detail(request: &ServiceRequest) {
    println!("{} {}", format!("#{}", request.id).bold(), badge(request.category()));
    println!("  Status:        {}", request.status);
    println!("  Customer:      {} ({})", request.customer_name, request.customer_phone_number);
    if let Some(email) = &request.customer_email {
        println!("  Email:         {}", email);
    }
    println!(
        "  Vehicle:       {} {} {}",
        request.vehicle_brand,
        request.vehicle_model.as_deref().unwrap_or(""),
        request.vehicle_number
    );
    println!("  Type:          {}", request.service_type.label());
    println!("  From:          {}", request.from_address());
    println!("  To:            {}", request.to_address());
    println!("  Pickup time:   {}", format_display(&request.pickup_time));
    if let Some(driver) = &request.assigned_driver {
        println!("  Driver:        {} (#{})", driver.name, driver.id);
    }
    if let Some(name) = &request.created_by_name {
        println!("  Created by:    {}", name);
    }
}

pub fn counts(counts: &StatusCounts) {
    let line = counts
        .iter()
        .map(|(category, n)| format!("{} {}", badge(category), n))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}  total {}", line, counts.total());
}

pub fn driver_list(drivers: &[Driver]) {
    println!("{}", "Drivers".bright_blue().bold());
    if drivers.is_empty() {
        println!("{}", "No drivers found.".yellow());
        return;
    }
    for driver in drivers {
        println!(
            "{:>5}  {:<24} {:<14} {}",
            driver.id,
            driver.name,
            driver.phone_number.as_deref().unwrap_or("-"),
            driver.license_number.as_deref().unwrap_or("-")
        );
    }
}

pub fn success(message: &str) {
    println!("{}", format!("✅ {}", message).bright_green());
}

/// Error para el usuario, con detalle por campo en validaciones
pub fn error(err: &AppError) {
    if let AppError::Validation(fields) = err {
        for (field, message) in fields.iter() {
            eprintln!("  {} {}", format!("{}:", field.as_str()).bright_yellow(), message);
        }
    }
    eprintln!("{}", format!("❌ {}", err.user_message()).bright_red());
    if err.is_local_rejection() {
        eprintln!("{}", "Nothing was sent to the server.".dimmed());
    }
    if err.requires_login() {
        eprintln!("{}", "Run `pickup-console login` to sign in.".dimmed());
    }
}
