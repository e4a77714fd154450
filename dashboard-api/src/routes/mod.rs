/// API route handlers
///
/// - `health`: Health check endpoint
/// - `seed`: Database seeding endpoint

pub mod health;
pub mod seed;
