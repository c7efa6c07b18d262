//! Client-side logic for the portfolio site.
//!
//! Two flows live here, each as explicit state with pure transitions so they
//! can be driven from any UI layer:
//!
//! - [`contact`]: form validation, submission to the contact relay, and the
//!   contact screen state machine.
//! - [`feed`]: retrieval of public repositories for one account and the
//!   project feed view derived from them.
//!
//! [`config`] loads the site settings and wires the HTTP adapters.
//!
//! # Example
//!
//! ```
//! use portfolio_site::contact::{ContactForm, FormField, validate};
//!
//! let form = ContactForm::new("Al", "bad", "hi");
//! let errors = validate(&form);
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.get(FormField::Email), Some("Email is invalid."));
//! ```

pub mod config;
pub mod contact;
pub mod feed;

pub use config::{Site, SiteConfigError, SiteSettings};
