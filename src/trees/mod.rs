pub mod classifier;
pub mod impurity;
pub mod node;
pub mod params;
mod printer;
pub mod split;
