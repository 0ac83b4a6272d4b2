// libnfcfe/src/types.rs

use crate::Error;
use derive_more::{BitAnd, BitOr};
use std::convert::TryFrom;

/// Technology mask - Newtype Pattern (bitset of RF technologies)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, BitOr, BitAnd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechMask(u8);

impl TechMask {
    pub const NONE: Self = Self(0x00);
    pub const NFC_A: Self = Self(0x01);
    pub const NFC_B: Self = Self(0x02);
    pub const NFC_F: Self = Self(0x04);
    pub const NFC_V: Self = Self(0x08);
    pub const ACTIVE_P2P: Self = Self(0x10);
    pub const ALL: Self = Self(0x1f);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, tech: Technology) -> bool {
        self.0 & tech.mask().0 != 0
    }

    /// Enabled technologies in polling order.
    pub fn technologies(&self) -> impl Iterator<Item = Technology> + '_ {
        Technology::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

/// Technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Technology {
    #[default]
    NfcA,
    NfcB,
    NfcF,
    NfcV,
    ActiveP2p,
}

impl Technology {
    pub const ALL: [Technology; 5] = [
        Technology::NfcA,
        Technology::NfcB,
        Technology::NfcF,
        Technology::NfcV,
        Technology::ActiveP2p,
    ];

    pub fn mask(&self) -> TechMask {
        match self {
            Technology::NfcA => TechMask::NFC_A,
            Technology::NfcB => TechMask::NFC_B,
            Technology::NfcF => TechMask::NFC_F,
            Technology::NfcV => TechMask::NFC_V,
            Technology::ActiveP2p => TechMask::ACTIVE_P2P,
        }
    }
}

/// NFCID (UID / PUPI / IDm) of up to 10 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nfcid {
    bytes: [u8; Nfcid::MAX_LEN],
    len: u8,
}

impl Nfcid {
    pub const MAX_LEN: usize = 10;

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Nfcid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() > Self::MAX_LEN {
            return Err(Error::InvalidLength {
                expected: Self::MAX_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; Self::MAX_LEN];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len() as u8,
        })
    }
}

/// Technology-specific activation parameters reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationParams {
    #[default]
    None,
    NfcA { sens_res: [u8; 2], sel_res: u8 },
    NfcB { application_data: [u8; 4], protocol_info: [u8; 3] },
    NfcF { pad: [u8; 8], system_code: u16 },
    NfcV { dsfid: u8 },
    ActiveP2p,
}

/// One entry of a discovery result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceDescriptor {
    pub technology: Technology,
    pub nfcid: Nfcid,
    pub params: ActivationParams,
}

impl DeviceDescriptor {
    pub fn new(technology: Technology, nfcid: Nfcid, params: ActivationParams) -> Self {
        Self {
            technology,
            nfcid,
            params,
        }
    }

    /// Convenience constructor for an NFC-A device.
    pub fn nfc_a(uid: &[u8], sens_res: [u8; 2], sel_res: u8) -> crate::Result<Self> {
        Ok(Self::new(
            Technology::NfcA,
            Nfcid::try_from(uid)?,
            ActivationParams::NfcA { sens_res, sel_res },
        ))
    }
}

/// Discovery results written into caller-supplied storage.
#[derive(Debug)]
pub struct DiscoveredDeviceList<'a> {
    storage: &'a mut [DeviceDescriptor],
    count: usize,
}

impl<'a> DiscoveredDeviceList<'a> {
    pub fn new(storage: &'a mut [DeviceDescriptor]) -> Self {
        Self { storage, count: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[DeviceDescriptor] {
        &self.storage[..self.count]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.as_slice().iter()
    }

    pub fn first(&self) -> Option<&DeviceDescriptor> {
        self.as_slice().first()
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Read back at most `limit` devices from the engine.
    pub(crate) fn fill_from(&mut self, engine: &dyn crate::engine::RfEngine, limit: usize) {
        let limit = limit.min(self.storage.len());
        let n = engine.discovered_devices(&mut self.storage[..limit]);
        self.count = n.min(limit);
    }
}

/// Identity presented while emulating an NFC-A device in listen mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenIdentity {
    pub nfcid1: Nfcid,
    /// SENS_RES (ATQA)
    pub sens_res: [u8; 2],
    /// SEL_RES (SAK)
    pub sel_res: u8,
}

impl ListenIdentity {
    /// NFCID1 must be a single, double or triple size UID.
    pub fn new(uid: &[u8], sens_res: [u8; 2], sel_res: u8) -> crate::Result<Self> {
        if !matches!(uid.len(), 4 | 7 | 10) {
            return Err(Error::InvalidParameter(format!(
                "nfcid1 must be 4, 7 or 10 bytes, got {}",
                uid.len()
            )));
        }
        Ok(Self {
            nfcid1: Nfcid::try_from(uid)?,
            sens_res,
            sel_res,
        })
    }
}

/// How the engine frames an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExchangeKind {
    /// Standard frame, CRC appended and checked by the engine.
    #[default]
    Transparent,
    /// Raw bit-oriented frame without CRC (e.g. REQA, anticollision).
    RawBits,
    /// ISO-DEP (ISO14443-4) block exchange.
    IsoDep,
    /// NFC-DEP (peer to peer) exchange.
    NfcDep,
}

/// Caller-owned buffers for one exchange.
#[derive(Debug)]
pub struct TxRxContext<'a> {
    pub tx: &'a [u8],
    pub tx_bits: usize,
    pub rx: &'a mut [u8],
    pub rx_bits: usize,
    pub kind: ExchangeKind,
}

impl<'a> TxRxContext<'a> {
    /// Whole-byte transmit of `tx`; `rx` receives the answer.
    pub fn new(tx: &'a [u8], rx: &'a mut [u8], kind: ExchangeKind) -> Self {
        Self {
            tx,
            tx_bits: tx.len() * 8,
            rx,
            rx_bits: 0,
            kind,
        }
    }

    /// Override the transmit length for frames ending in a partial byte.
    pub fn with_tx_bits(mut self, bits: usize) -> Self {
        self.tx_bits = bits;
        self
    }

    pub fn rx_len(&self) -> usize {
        self.rx_bits.div_ceil(8)
    }

    /// Received bytes (the last one may be partial).
    pub fn received(&self) -> &[u8] {
        &self.rx[..self.rx_len().min(self.rx.len())]
    }
}
