//! End-to-end tests for the deductive query engine, kept as their own crate
//! (mirroring the teacher's `chalk-tests`) so scenario coverage doesn't
//! bloat the crates it's testing. Everything here is `#[cfg(test)]`; the
//! crate exports nothing.

#[cfg(test)]
mod scenarios;

#[cfg(test)]
mod invariants;
