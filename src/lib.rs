//! Crustaba computes the arguments and attacks of Assumption-based Argumentation frameworks,
//! including the preference-based ABA+ attacks between sets of assumptions.

#![warn(missing_docs)]

pub mod aba;

pub mod io;
