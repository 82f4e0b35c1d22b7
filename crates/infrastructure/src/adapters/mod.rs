//! Adapters implementing application ports

mod otp_adapter;

pub use otp_adapter::OtpPlannerAdapter;
