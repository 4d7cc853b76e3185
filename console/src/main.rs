//! Demo entry-point: wires the in-memory adapters to the roster controller
//! and walks through the add / search / logout / delete flows.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use roster_console::domain::{
    BlobRef, EmployeeId, Error, RosterService, RosterSession, User, UserId,
};
use roster_console::outbound::memory::{MemoryBlobStore, MemoryUserDocuments};
use roster_console::view::RosterController;

#[tokio::main]
async fn main() -> Result<(), Error> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let documents = Arc::new(MemoryUserDocuments::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    seed_existing_user(&documents, &blobs)?;

    let mut session = RosterSession::start(documents.as_ref()).await?;
    let mut roster = session.watch();
    roster.changed().await;

    let service = RosterService::new(documents.clone(), blobs.clone());
    let mut controller = RosterController::new(service, roster);

    // Add a user through the dialog flow.
    controller.open_add_dialog();
    controller.form_mut().set_employee_id("b2");
    controller.form_mut().set_name("Kim");
    controller.form_mut().set_trade("Plumb");
    let added = controller.submit_add().await?;
    info!(employee_id = %added.employee_id, "user added");
    while !controller.visible_rows().iter().any(|user| user.id == added.id) {
        if !controller.roster_changed().await {
            return Err(Error::internal("roster feed closed before the add arrived"));
        }
    }

    controller.set_search("elec");
    for row in controller.visible_rows() {
        info!(employee_id = %row.employee_id, name = %row.name, trade = %row.trade, "matching row");
    }
    controller.set_search("");

    // Revoke the seeded user's push token.
    let seeded = controller
        .visible_rows()
        .into_iter()
        .find(|user| user.employee_id.as_ref() == "A1")
        .ok_or_else(|| Error::not_found("seeded user missing from roster"))?;
    controller.log_out(&seeded.id).await?;
    info!(employee_id = %seeded.employee_id, "push token revoked");

    // Delete the seeded user through the confirmation flow.
    controller.request_delete(seeded.id.clone());
    controller.confirm_delete().await?;
    while controller.visible_rows().iter().any(|user| user.id == seeded.id) {
        if !controller.roster_changed().await {
            return Err(Error::internal("roster feed closed before the delete arrived"));
        }
    }
    info!(remaining = controller.visible_rows().len(), "user deleted");

    session.stop().await;
    Ok(())
}

fn seed_existing_user(
    documents: &MemoryUserDocuments,
    blobs: &MemoryBlobStore,
) -> Result<(), Error> {
    let image = BlobRef::new("images/jo.png").map_err(|err| Error::internal(err.to_string()))?;
    blobs.put(&image);
    documents.seed(User {
        id: UserId::random(),
        employee_id: EmployeeId::new("A1").map_err(|err| Error::internal(err.to_string()))?,
        name: "Jo".into(),
        trade: "Elec".into(),
        image_url: image.to_string(),
        expo_push_token: "ExponentPushToken[demo]".into(),
        created_at: Utc::now(),
    });
    Ok(())
}
