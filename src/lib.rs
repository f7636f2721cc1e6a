pub mod cadastro;
pub mod config;
pub mod evento;
pub mod listagem;
pub mod render;
pub mod tracing;
