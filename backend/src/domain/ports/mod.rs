//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_relay_command;
mod mail_transport;

#[cfg(test)]
pub use contact_relay_command::MockContactRelayCommand;
pub use contact_relay_command::{ContactRelayCommand, FixtureContactRelayCommand};
#[cfg(test)]
pub use mail_transport::MockMailTransport;
pub use mail_transport::{FixtureMailTransport, MailTransport, MailTransportError};
