/// Domain layer - asset identities, dependency records, the graph aggregate
/// and the pure analysis services that run over it
pub mod domain;
pub mod services;
