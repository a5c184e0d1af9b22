pub mod calibrate;
pub mod run;
pub mod stress;
