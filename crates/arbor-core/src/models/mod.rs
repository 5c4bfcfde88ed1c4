mod interaction;

pub use interaction::Interaction;
