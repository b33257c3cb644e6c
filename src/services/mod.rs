pub mod ticket;

pub use ticket::{HallSummary, ServiceError, TicketService};
