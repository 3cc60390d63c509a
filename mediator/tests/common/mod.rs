#![allow(dead_code)]

use mediator::{
    CancellationToken, MediatorError, Notification, NotificationHandler, Request, RequestHandler,
    testing::CallLog,
};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

// ============================================================================
// Test Message Types
// ============================================================================

#[derive(Clone, Debug)]
pub struct Ping {
    pub message: String,
}

impl Request for Ping {
    type Response = String;
}

#[derive(Clone, Debug)]
pub struct CreateCustomer {
    pub name: String,
    pub email: String,
}

impl Request for CreateCustomer {
    type Response = u64;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Echo(pub String);

impl Request for Echo {
    type Response = Echo;
}

/// Asks for the id of the handler instance that served the request.
#[derive(Clone, Debug)]
pub struct WhoAmI;

impl Request for WhoAmI {
    type Response = usize;
}

#[derive(Clone, Debug)]
pub struct CustomerCreated {
    pub id: u64,
}

impl Notification for CustomerCreated {}

#[derive(Clone, Debug)]
pub struct Tick;

impl Notification for Tick {}

// ============================================================================
// Test Handlers
// ============================================================================

pub struct PingHandler;

impl RequestHandler<Ping> for PingHandler {
    async fn handle(&self, ping: &Ping, _cancel: &CancellationToken) -> Result<String, MediatorError> {
        Ok(format!("Pong: {}", ping.message))
    }
}

pub struct CreateCustomerHandler;

impl RequestHandler<CreateCustomer> for CreateCustomerHandler {
    async fn handle(
        &self,
        command: &CreateCustomer,
        _cancel: &CancellationToken,
    ) -> Result<u64, MediatorError> {
        if command.email.contains('@') {
            Ok(42)
        } else {
            Err(MediatorError::handler(InvalidEmail(command.email.clone())))
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct InvalidEmail(pub String);

impl fmt::Display for InvalidEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid email `{}`", self.0)
    }
}

impl std::error::Error for InvalidEmail {}

/// A handler that remembers which instance it is.
pub struct Instance {
    pub id: usize,
}

impl RequestHandler<WhoAmI> for Instance {
    async fn handle(&self, _request: &WhoAmI, _cancel: &CancellationToken) -> Result<usize, MediatorError> {
        Ok(self.id)
    }
}

/// Factory producing [`Instance`]s with increasing ids, starting at 1.
pub fn instance_factory(created: &Arc<AtomicUsize>) -> impl Fn() -> Instance + Send + Sync + 'static {
    let created = created.clone();
    move || Instance {
        id: created.fetch_add(1, Ordering::SeqCst) + 1,
    }
}

/// Records `"{tag}:{id}"` for every customer it sees.
pub struct CustomerCreatedHandler {
    pub tag: &'static str,
    pub log: CallLog,
}

impl NotificationHandler<CustomerCreated> for CustomerCreatedHandler {
    async fn handle(
        &self,
        event: &CustomerCreated,
        _cancel: &CancellationToken,
    ) -> Result<(), MediatorError> {
        self.log.push(format!("{}:{}", self.tag, event.id));
        Ok(())
    }
}
