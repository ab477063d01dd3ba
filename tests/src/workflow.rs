mod failures;
mod lifecycle;
