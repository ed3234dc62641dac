//! MQTT client for receiving OwnTracks presence events
//!
//! Subscribes to the presence topic tree, classifies each payload into an
//! InboundEvent, and forwards it to the tracker channel. Events are sent via
//! try_send so a slow tracker never blocks the MQTT eventloop; drops are
//! logged (rate-limited) rather than applying backpressure.

use crate::domain::types::{InboundEvent, Person, PresencePayload, WaypointEvent};
use crate::infra::config::Config;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::time::{Duration, Instant};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// Start the MQTT client and send classified events to the channel
pub async fn start_mqtt_client(
    config: &Config,
    event_tx: mpsc::Sender<InboundEvent>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut mqttoptions =
        MqttOptions::new(config.mqtt_client_id(), config.mqtt_host(), config.mqtt_port());
    mqttoptions.set_keep_alive(Duration::from_secs(30));

    // Set credentials if configured
    if let (Some(username), Some(password)) = (config.mqtt_username(), config.mqtt_password()) {
        mqttoptions.set_credentials(username, password);
    }

    let (client, mut eventloop) = AsyncClient::new(mqttoptions, 100);
    let topic_filter = format!("{}/#", config.mqtt_base_topic());
    client.subscribe(&topic_filter, QoS::AtMostOnce).await?;

    info!(topic = %topic_filter, host = %config.mqtt_host(), port = %config.mqtt_port(), "MQTT client subscribed");

    // Rate-limit drop warnings to 1 per second
    let mut last_drop_warn = Instant::now() - Duration::from_secs(2);

    loop {
        tokio::select! {
            // Check for shutdown signal
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("mqtt_shutdown");
                    return Ok(());
                }
            }
            // Process MQTT events
            result = eventloop.poll() => {
                match result {
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        let topic = &publish.topic;
                        match std::str::from_utf8(&publish.payload) {
                            Ok(json_str) => {
                                if let Some(event) =
                                    parse_presence_message(config.mqtt_base_topic(), topic, json_str)
                                {
                                    debug!(topic = %topic, kind = %event.kind(), person = %event.person(), "presence event");
                                    if let Err(e) = event_tx.try_send(event) {
                                        match e {
                                            TrySendError::Full(_) => {
                                                if last_drop_warn.elapsed() > Duration::from_secs(1) {
                                                    warn!("presence_event_dropped: channel full");
                                                    last_drop_warn = Instant::now();
                                                }
                                            }
                                            TrySendError::Closed(_) => {
                                                warn!("Event channel closed");
                                                return Ok(());
                                            }
                                        }
                                    }
                                }
                            }
                            Err(e) => {
                                warn!(error = %e, "Invalid UTF-8 in MQTT payload");
                            }
                        }
                    }
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        info!("MQTT connected");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "MQTT error");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        }
    }
}

/// Render a device epoch-seconds timestamp as RFC 3339 for logs
fn format_device_timestamp(tst: i64) -> Option<String> {
    OffsetDateTime::from_unix_timestamp(tst).ok().and_then(|dt| dt.format(&Rfc3339).ok())
}

/// Extract the person identifier from a presence topic.
///
/// Topics look like `{base}/{person}` or `{base}/{person}/{device}[/event]`;
/// the person is the first segment after the base topic.
fn person_from_topic<'a>(base_topic: &str, topic: &'a str) -> Option<&'a str> {
    let rest = topic.strip_prefix(base_topic)?.strip_prefix('/')?;
    match rest.split('/').next() {
        Some(person) if !person.is_empty() => Some(person),
        _ => None,
    }
}

/// Classify one raw MQTT message into an InboundEvent.
///
/// Returns None for messages that are not presence events: bad JSON, an
/// unknown `_type`, or a topic without a person segment. Those are logged
/// at debug level and dropped; classification itself never fails.
pub fn parse_presence_message(
    base_topic: &str,
    topic: &str,
    json_str: &str,
) -> Option<InboundEvent> {
    let Some(person) = person_from_topic(base_topic, topic) else {
        debug!(topic = %topic, "topic_without_person_segment");
        return None;
    };
    let payload: PresencePayload = match serde_json::from_str(json_str) {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, topic = %topic, "Failed to parse presence payload");
            return None;
        }
    };
    if let Some(device_ts) = payload.tst.and_then(format_device_timestamp) {
        debug!(topic = %topic, device_ts = %device_ts, "presence_payload");
    }
    let person = Person::new(person);

    match payload.msg_type.as_str() {
        // A location report inside known regions is an update; one without
        // region information means the device is between regions.
        "location" => match payload.inregions {
            Some(regions) => Some(InboundEvent::RegionUpdate { person, regions }),
            None => Some(InboundEvent::Traveling { person }),
        },
        "transition" => match payload.event.as_deref() {
            Some("enter") => match payload.desc {
                Some(desc) => Some(InboundEvent::RegionUpdate { person, regions: vec![desc] }),
                None => {
                    debug!(topic = %topic, "enter_transition_without_region");
                    None
                }
            },
            Some("leave") => Some(InboundEvent::Traveling { person }),
            _ => {
                debug!(topic = %topic, "transition_without_direction");
                None
            }
        },
        // Device last will: the broker lost the connection
        "lwt" => Some(InboundEvent::Lost { person }),
        "waypoint" => {
            let raw = serde_json::from_str(json_str).ok()?;
            Some(InboundEvent::Waypoint(WaypointEvent { person, payload: raw }))
        }
        other => {
            debug!(msg_type = %other, topic = %topic, "unhandled_presence_message_type");
            None
        }
    }
}
