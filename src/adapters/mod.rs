/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports,
/// providing the actual integration with files, the console and the cache
/// store. The CLI in `main.rs` acts as the inbound adapter.
pub mod outbound;
