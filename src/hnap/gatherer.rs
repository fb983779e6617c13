use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::config::ModemConfig;
use crate::error::{HnapError, TransportError};
use crate::hnap::actions::{
    GET_HOME_CONNECTION, GET_MOTO_STATUS_CONNECTION_INFO, GET_MOTO_STATUS_DOWNSTREAM_CHANNEL_INFO,
    GET_MOTO_STATUS_SOFTWARE, GET_MOTO_STATUS_STARTUP_SEQUENCE,
    GET_MOTO_STATUS_UPSTREAM_CHANNEL_INFO, GET_MULTIPLE_HNAPS, STATUS_ACTIONS,
};
use crate::hnap::device::{
    ConnectionInfo, DownstreamChannelInfo, HomeConnection, SoftwareStatus, StartupSequence,
    UpstreamChannelInfo,
};
use crate::hnap::envelope::{batch_request, HnapEnvelope};
use crate::hnap::plustable;
use crate::hnap::records::{decode_table, ChannelRecord, DownstreamChannel, UpstreamChannel};
use crate::hnap::session::{AuthSession, Credentials, Session};
use crate::hnap::transport::{HttpTransport, Transport};

const OPERATION: &str = "gather";

/// Result of one poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub downstream: Vec<DownstreamChannel>,
    pub upstream: Vec<UpstreamChannel>,
    /// Present when the gatherer was asked for device identity.
    pub device: Option<DeviceInfo>,
}

/// Identity and link state of the modem.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceInfo {
    pub online: bool,
    pub serial_number: String,
    pub software_version: String,
    pub hardware_version: String,
    pub spec_version: String,
    pub customer_version: String,
    pub boot_file: String,
    pub hardware_address: String,
    pub downstream_frequency_hz: Option<f64>,
    pub uptime: Option<Duration>,
    pub network_access: bool,
}

/// Logs in to the modem and fetches its status in one batched call.
pub struct Gatherer {
    session: AuthSession,
    transport: Arc<dyn Transport>,
    device_info: bool,
}

impl Gatherer {
    /// Builds a gatherer talking HTTP(S) to the configured endpoint.
    pub fn new(config: &ModemConfig) -> Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::new(config)?);
        let credentials = Credentials::new(&config.user, &config.password);
        Ok(Self::with_transport(credentials, transport).with_device_info(config.device_info))
    }

    pub fn with_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            session: AuthSession::new(credentials, Arc::clone(&transport)),
            transport,
            device_info: true,
        }
    }

    /// Whether `gather` also requires and decodes the identity payloads.
    pub fn with_device_info(mut self, enabled: bool) -> Self {
        self.device_info = enabled;
        self
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Establishes a fresh session, replacing any current one.
    pub async fn login(&self) -> Result<(), HnapError> {
        self.session.login().await.map(|_| ())
    }

    /// Fetches and decodes the status of the modem.
    ///
    /// Requires a prior [`login`](Self::login). The collection is all or
    /// nothing: the first row or payload that fails to decode aborts it.
    pub async fn gather(&self) -> Result<Collection, HnapError> {
        let session = self
            .session
            .snapshot()
            .await
            .ok_or(HnapError::NotAuthenticated {
                operation: OPERATION,
            })?;

        let envelope = self.fetch(&session).await?;

        let downstream: Vec<DownstreamChannel> = decode_channels(
            &envelope,
            GET_MOTO_STATUS_DOWNSTREAM_CHANNEL_INFO,
            |info: DownstreamChannelInfo| info.table,
        )?;
        let upstream: Vec<UpstreamChannel> = decode_channels(
            &envelope,
            GET_MOTO_STATUS_UPSTREAM_CHANNEL_INFO,
            |info: UpstreamChannelInfo| info.table,
        )?;

        let device = if self.device_info {
            Some(self.device_info(&envelope, downstream.len(), upstream.len())?)
        } else {
            None
        };

        tracing::debug!(
            downstream = downstream.len(),
            upstream = upstream.len(),
            "gathered modem status"
        );
        Ok(Collection {
            downstream,
            upstream,
            device,
        })
    }

    async fn fetch(&self, session: &Session) -> Result<HnapEnvelope, HnapError> {
        let request = session.signed_request(
            GET_MULTIPLE_HNAPS,
            batch_request(&STATUS_ACTIONS),
            Utc::now(),
        );

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| HnapError::transport(OPERATION, GET_MULTIPLE_HNAPS, e))?;

        match response.status {
            401 | 403 => {
                self.session.invalidate(session.generation()).await;
                return Err(HnapError::auth_rejected(
                    OPERATION,
                    GET_MULTIPLE_HNAPS,
                    response.status,
                ));
            }
            _ if !response.is_success() => {
                return Err(HnapError::transport(
                    OPERATION,
                    GET_MULTIPLE_HNAPS,
                    TransportError::Status {
                        status: response.status,
                        body: response.body,
                    },
                ));
            }
            _ => {}
        }

        HnapEnvelope::from_body(&response.body)
            .map_err(|e| HnapError::protocol(OPERATION, GET_MULTIPLE_HNAPS, e))
    }

    fn device_info(
        &self,
        envelope: &HnapEnvelope,
        downstream: usize,
        upstream: usize,
    ) -> Result<DeviceInfo, HnapError> {
        let software: SoftwareStatus = decode_payload(envelope, GET_MOTO_STATUS_SOFTWARE)?;
        let startup: StartupSequence = decode_payload(envelope, GET_MOTO_STATUS_STARTUP_SEQUENCE)?;
        let home: HomeConnection = decode_payload(envelope, GET_HOME_CONNECTION)?;
        let connection: ConnectionInfo = decode_payload(envelope, GET_MOTO_STATUS_CONNECTION_INFO)?;

        let (advertised_down, advertised_up) = home.channel_counts();
        if advertised_down.is_some_and(|n| n != downstream)
            || advertised_up.is_some_and(|n| n != upstream)
        {
            tracing::warn!(
                ?advertised_down,
                ?advertised_up,
                downstream,
                upstream,
                "channel tables disagree with advertised channel counts"
            );
        }

        let uptime = connection.uptime();
        if uptime.is_none() && !connection.uptime.is_empty() {
            tracing::debug!(uptime = %connection.uptime, "unrecognised uptime format");
        }

        Ok(DeviceInfo {
            online: home.is_online(),
            serial_number: software.serial_number,
            software_version: software.software_version,
            hardware_version: software.hardware_version,
            spec_version: software.spec_version,
            customer_version: software.customer_version,
            downstream_frequency_hz: startup.downstream_frequency_hz(),
            boot_file: startup.boot_file,
            hardware_address: software.hardware_address,
            uptime,
            network_access: connection.network_access_allowed(),
        })
    }
}

fn decode_payload<T: DeserializeOwned>(
    envelope: &HnapEnvelope,
    action: &str,
) -> Result<T, HnapError> {
    envelope
        .decode(action)
        .map_err(|e| HnapError::protocol(OPERATION, action, e))
}

fn decode_channels<P, R>(
    envelope: &HnapEnvelope,
    action: &str,
    table: impl FnOnce(P) -> String,
) -> Result<Vec<R>, HnapError>
where
    P: DeserializeOwned,
    R: ChannelRecord,
{
    let payload: P = decode_payload(envelope, action)?;
    let rows = plustable::parse(&table(payload));

    decode_table(&rows).map_err(|failure| HnapError::Record {
        operation: OPERATION,
        action: action.to_string(),
        index: failure.index,
        row: failure.row,
        source: failure.source,
    })
}
