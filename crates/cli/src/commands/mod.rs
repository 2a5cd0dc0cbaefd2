pub mod count;
pub mod generate;
pub mod history;
pub mod kb;
pub mod key;
pub mod onboard;
pub mod revise;
pub mod status;
