pub mod classifier;
pub mod impl_fake;
pub mod interface;
