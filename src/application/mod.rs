//! # Application Services
//!
//! Cross-entity workflows composed from the repositories and domain
//! services. Writes that touch several tables run inside one transaction.

pub mod dashboard;
pub mod household_management;
pub mod rsvp_submission;
pub mod rsvp_wizard;

pub use dashboard::{DashboardOverview, DashboardService};
pub use household_management::HouseholdManagementService;
pub use rsvp_submission::{RsvpSubmissionService, SubmissionReceipt};
pub use rsvp_wizard::{RsvpLookup, RsvpWizardService};
