//! One calculator per method. Each is a pure function of
//! `(criteria, alternatives)` that returns a fully ranked result list,
//! or an empty list when either input is empty.

pub mod ahp;
pub mod moora;
pub mod saw;
pub mod smart;
pub mod topsis;
pub mod wp;
