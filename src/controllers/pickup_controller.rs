use colored::*;

use crate::cli::{PickupCommand, ScopeArgs};
use crate::controllers::render;
use crate::models::service_request::ServiceRequestForm;
use crate::services::pickup_service::{MutationOutcome, PickupListScope, PickupService};
use crate::state::AppState;
use crate::utils::datetime::today_in_india;
use crate::utils::errors::AppResult;
use crate::utils::validation::validate_schedule_date;

pub async fn handle(state: &AppState, command: PickupCommand) -> AppResult<()> {
    let service = PickupService::new(state);

    match command {
        PickupCommand::Recent => {
            render::pickup_list(&service.list(PickupListScope::Recent).await?);
        }
        PickupCommand::ByDate { date } => {
            let date = match date {
                Some(raw) => validate_schedule_date(&raw)?,
                None => service.selected_date().await?.unwrap_or_else(today_in_india),
            };
            render::pickup_list(&service.select_date(date).await?);
        }
        PickupCommand::Cached => match service.cached().await? {
            Some(list) => render::pickup_list(&list),
            None => println!("{}", "Nothing fetched yet.".yellow()),
        },
        PickupCommand::Board { scope } => {
            let board = service.board(resolve_scope(&scope)?).await?;
            render::pickup_list(&board.list);
            println!();
            render::counts(&board.counts);
            println!();
            render::driver_list(&board.drivers);
        }
        PickupCommand::Show { id, scope } => {
            let request = service.get(id, resolve_scope(&scope)?).await?;
            render::pickup_detail(&request);
        }
        PickupCommand::Create { fields, scope } => {
            let form = fields.apply(ServiceRequestForm::default());
            let outcome = service.create(&form, resolve_scope(&scope)?).await?;
            report(&outcome, "created");
        }
        PickupCommand::Edit { id, fields, scope } => {
            let scope = resolve_scope(&scope)?;
            let existing = service.get(id, scope).await?;
            let form = fields.apply(existing.to_form());
            let outcome = service.edit(id, &form, scope).await?;
            report(&outcome, "updated");
        }
        PickupCommand::Delete { id, scope } => {
            let outcome = service.delete(id, resolve_scope(&scope)?).await?;
            render::success(&format!("Request #{} deleted", id));
            render::pickup_list(&outcome.list);
        }
        PickupCommand::Status { id, status, driver, scope } => {
            let outcome = service
                .change_status(id, status, driver, resolve_scope(&scope)?)
                .await?;
            report(&outcome, "status updated");
        }
        PickupCommand::Counts => match service.cached().await? {
            Some(list) => {
                println!("{}", list.scope.to_string().bright_blue().bold());
                render::counts(&list.counts());
            }
            None => println!("{}", "Nothing fetched yet.".yellow()),
        },
    }
    Ok(())
}

fn resolve_scope(args: &ScopeArgs) -> AppResult<PickupListScope> {
    match args.date.as_deref() {
        Some(raw) => Ok(PickupListScope::ByDate(validate_schedule_date(raw)?)),
        None => Ok(PickupListScope::Recent),
    }
}

fn report(outcome: &MutationOutcome, action: &str) {
    if let Some(saved) = &outcome.saved {
        render::success(&format!("Request #{} {}", saved.id, action));
        render::pickup_detail(saved);
        println!();
    }
    render::pickup_list(&outcome.list);
}
