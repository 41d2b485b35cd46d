pub mod composers;
pub mod english;
pub mod format;
pub mod generator;
pub mod phrases;
pub mod random;
pub mod selection;
pub mod session;
pub mod template;
