//! Fixed-payment loan amortization.
//!
//! The engine ([`schedule`], [`table`]) never fails: incomplete or degenerate
//! input produces a zero summary and an empty table. [`input`] coerces loosely
//! typed values and offers a strict validation path; [`analysis`] wraps both
//! in the standard computation envelope.

pub mod analysis;
pub mod input;
pub mod schedule;
pub mod table;

pub use analysis::{analyze_loan, analyze_request, summarize_request, LoanAnalysis, LoanRequest};
pub use input::{coerce_number, InputPolicy, LoanInput, RawLoanInput, MAX_TERM_MONTHS};
pub use schedule::{compute_schedule, PaymentSummary};
pub use table::{build_amortization_table, PeriodRow, BALANCE_CLAMP_THRESHOLD};
