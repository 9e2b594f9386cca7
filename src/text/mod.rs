pub mod normalizer;
pub mod scanner;
pub mod speakers;
pub mod whitespace;

pub use normalizer::*;
pub use scanner::*;
pub use speakers::*;
pub use whitespace::*;
