// Domain layer: core models and ports (interfaces). No external collaborators
// beyond std/serde; the concrete fetch/document/storage backends live under
// src/adapters.

pub mod model;
pub mod ports;
