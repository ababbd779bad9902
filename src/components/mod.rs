//! Shared UI components exported for routes and features.

mod already_signed_in;
pub(crate) mod ui;

pub(crate) use already_signed_in::AlreadySignedInPanel;
pub(crate) use ui::{Alert, AlertKind, Button, Spinner};
