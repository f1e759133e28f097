pub mod extract;
pub mod toc;
