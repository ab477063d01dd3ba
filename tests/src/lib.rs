//! Cross-crate tests driving the verification workflow through its ports.

#[cfg(test)]
mod support;
#[cfg(test)]
mod workflow;
