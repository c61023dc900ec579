pub mod handlers;
pub mod router;
pub mod validators;

#[cfg(test)]
mod tests;
