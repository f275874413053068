// Adapters layer: concrete implementations for external systems (http fetch,
// pdf engine, local artifact storage).

pub mod http;
pub mod pdf;
pub mod storage;
