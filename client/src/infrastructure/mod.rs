// Infrastructure layer - external concerns (gateway HTTP, logging)
// Implements interfaces defined in application layer

pub mod driven; // Output adapters (gateway client, log sink)
