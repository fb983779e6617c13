//! HNAP action names.
//!
//! Each action is addressed by its name in JSON bodies and by
//! [`action_uri`] in the `SOAPAction` header.

pub const NAMESPACE: &str = "http://purenetworks.com/HNAP1/";

pub const LOGIN: &str = "Login";
pub const GET_MULTIPLE_HNAPS: &str = "GetMultipleHNAPs";

pub const GET_HOME_ADDRESS: &str = "GetHomeAddress";
pub const GET_HOME_CONNECTION: &str = "GetHomeConnection";
pub const GET_MOTO_LAG_STATUS: &str = "GetMotoLagStatus";
pub const GET_MOTO_STATUS_CONNECTION_INFO: &str = "GetMotoStatusConnectionInfo";
pub const GET_MOTO_STATUS_DOWNSTREAM_CHANNEL_INFO: &str = "GetMotoStatusDownstreamChannelInfo";
pub const GET_MOTO_STATUS_LOG: &str = "GetMotoStatusLog";
pub const GET_MOTO_STATUS_SOFTWARE: &str = "GetMotoStatusSoftware";
pub const GET_MOTO_STATUS_STARTUP_SEQUENCE: &str = "GetMotoStatusStartupSequence";
pub const GET_MOTO_STATUS_UPSTREAM_CHANNEL_INFO: &str = "GetMotoStatusUpstreamChannelInfo";

/// Every sub-action requested by one poll.
pub const STATUS_ACTIONS: [&str; 9] = [
    GET_HOME_ADDRESS,
    GET_HOME_CONNECTION,
    GET_MOTO_LAG_STATUS,
    GET_MOTO_STATUS_CONNECTION_INFO,
    GET_MOTO_STATUS_DOWNSTREAM_CHANNEL_INFO,
    GET_MOTO_STATUS_LOG,
    GET_MOTO_STATUS_SOFTWARE,
    GET_MOTO_STATUS_STARTUP_SEQUENCE,
    GET_MOTO_STATUS_UPSTREAM_CHANNEL_INFO,
];

/// Full URI of an action, as signed and sent in `SOAPAction`.
pub fn action_uri(action: &str) -> String {
    format!("{NAMESPACE}{action}")
}
