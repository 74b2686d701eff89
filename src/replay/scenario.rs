use std::fs;
use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::ctl::{ControllerConfig, ControllerEvent, FrameIn};
use crate::error::ConfigError;
use crate::net::{ETH_TYPE_IPV4, Frame, LinkSpec, MacAddr, PortNo, SwitchId};
use crate::topo::{TopologySnapshot, build_ladder8, build_linear, build_mesh4};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub config: Option<ControllerConfig>,
    /// Initial topology, reported before any event.
    #[serde(default)]
    pub topology: Option<TopologySpec>,
    /// Emit `switch_connected` for every switch of the initial topology.
    #[serde(default = "default_true")]
    pub connect_switches: bool,
    #[serde(default)]
    pub events: Vec<EventSpec>,
}

fn default_true() -> bool {
    true
}

fn default_ether_type() -> u16 {
    ETH_TYPE_IPV4
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologySpec {
    Linear {
        switches: u64,
    },
    Mesh4,
    Ladder8,
    Custom {
        #[serde(default)]
        switches: Vec<SwitchId>,
        links: Vec<LinkSpec>,
    },
}

impl TopologySpec {
    pub fn snapshot(&self) -> TopologySnapshot {
        match self {
            TopologySpec::Linear { switches } => build_linear(*switches),
            TopologySpec::Mesh4 => build_mesh4(),
            TopologySpec::Ladder8 => build_ladder8(),
            TopologySpec::Custom { switches, links } => {
                TopologySnapshot::from_parts(switches.clone(), links.clone())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventSpec {
    SwitchConnected {
        switch: SwitchId,
    },
    FrameIn {
        switch: SwitchId,
        in_port: PortNo,
        src: MacAddr,
        dst: MacAddr,
        #[serde(default = "default_ether_type")]
        ether_type: u16,
        #[serde(default)]
        ip_proto: Option<u8>,
        #[serde(default)]
        buffer_id: Option<u32>,
    },
    TopologyChanged {
        topology: TopologySpec,
    },
}

impl EventSpec {
    pub fn to_event(&self) -> ControllerEvent {
        match self {
            EventSpec::SwitchConnected { switch } => {
                ControllerEvent::SwitchConnected { switch: *switch }
            }
            EventSpec::FrameIn {
                switch,
                in_port,
                src,
                dst,
                ether_type,
                ip_proto,
                buffer_id,
            } => {
                let mut frame = Frame::new(*src, *dst, *ether_type);
                frame.ip_proto = *ip_proto;
                ControllerEvent::FrameIn(FrameIn {
                    switch: *switch,
                    in_port: *in_port,
                    frame,
                    buffer_id: *buffer_id,
                })
            }
            EventSpec::TopologyChanged { topology } => topology.snapshot().to_event(),
        }
    }
}

impl ScenarioSpec {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn from_json_file(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let spec: ScenarioSpec =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if spec.schema_version != SCHEMA_VERSION {
            return Err(ConfigError::Invalid(format!(
                "unsupported schema_version {} (expected {SCHEMA_VERSION})",
                spec.schema_version
            )));
        }
        Ok(spec)
    }

    /// Events in dispatch order: switch connections, the initial topology, then scripted events.
    pub fn to_events(&self) -> Vec<ControllerEvent> {
        let mut out = Vec::new();
        if let Some(topo) = &self.topology {
            let snap = topo.snapshot();
            if self.connect_switches {
                out.extend(
                    snap.switches
                        .iter()
                        .map(|&switch| ControllerEvent::SwitchConnected { switch }),
                );
            }
            out.push(snap.to_event());
        }
        out.extend(self.events.iter().map(EventSpec::to_event));
        out
    }
}
