//! 以太网帧摘要
//!
//! 协议解码由交换机代理完成，控制器只关心二层地址、以太类型和 IP 协议号。

pub const ETH_TYPE_IPV4: u16 = 0x0800;
pub const ETH_TYPE_ARP: u16 = 0x0806;
pub const ETH_TYPE_LLDP: u16 = 0x88cc;

pub const IP_PROTO_TCP: u8 = 6;
pub const IP_PROTO_UDP: u8 = 17;

use super::id::MacAddr;

/// 一个上送到控制器的帧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub src: MacAddr,
    pub dst: MacAddr,
    pub ether_type: u16,
    /// 仅 IPv4 帧有值
    pub ip_proto: Option<u8>,
    /// 原始帧字节；交换机已缓存该帧时可以为空
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(src: MacAddr, dst: MacAddr, ether_type: u16) -> Self {
        Self {
            src,
            dst,
            ether_type,
            ip_proto: None,
            data: Vec::new(),
        }
    }

    pub fn ipv4(src: MacAddr, dst: MacAddr, ip_proto: u8) -> Self {
        Self {
            ip_proto: Some(ip_proto),
            ..Frame::new(src, dst, ETH_TYPE_IPV4)
        }
    }

    /// 拓扑发现流量，不转发也不学习
    pub fn is_topology_control(&self) -> bool {
        self.ether_type == ETH_TYPE_LLDP
    }

    /// IPv4 传输层协议号
    pub fn transport_proto(&self) -> Option<u8> {
        if self.ether_type == ETH_TYPE_IPV4 {
            self.ip_proto
        } else {
            None
        }
    }
}
