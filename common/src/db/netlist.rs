//! Compressed net-to-pin adjacency.
//!
//! `flat_netpin` concatenates every net's pin list in net order and `netpin_start`
//! holds `num_nets + 1` offsets into it, so the pins of net `i` are
//! `flat_netpin[netpin_start[i]..netpin_start[i + 1]]`.

use crate::db::indices::{NetId, PinId};
use crate::error::{Result, WirelengthError};
use crate::util::check;
use std::ops::Range;

#[derive(Clone, Copy, Debug)]
pub struct NetPinView<'a> {
    flat_netpin: &'a [i32],
    netpin_start: &'a [i32],
}

impl<'a> NetPinView<'a> {
    /// Wraps the arrays after checking the offset invariants. Pin indices are
    /// validated separately because their bound comes from the coordinate array.
    pub fn new(flat_netpin: &'a [i32], netpin_start: &'a [i32]) -> Result<Self> {
        check::check_offsets(netpin_start, flat_netpin.len())?;
        Ok(Self {
            flat_netpin,
            netpin_start,
        })
    }

    pub fn num_nets(&self) -> usize {
        self.netpin_start.len() - 1
    }

    pub fn num_incidences(&self) -> usize {
        self.flat_netpin.len()
    }

    pub fn flat_netpin(&self) -> &'a [i32] {
        self.flat_netpin
    }

    pub fn netpin_start(&self) -> &'a [i32] {
        self.netpin_start
    }

    /// Half-open bounds of net `net` within `flat_netpin`.
    pub fn pins_of(&self, net: usize) -> Result<Range<usize>> {
        if net >= self.num_nets() {
            return Err(WirelengthError::NetIndex {
                net,
                num_nets: self.num_nets(),
            });
        }
        Ok(self.range(net))
    }

    #[inline(always)]
    pub fn pins(&self, net: NetId) -> &'a [i32] {
        &self.flat_netpin[self.range(net.index())]
    }

    #[inline(always)]
    pub fn degree(&self, net: NetId) -> usize {
        self.range(net.index()).len()
    }

    #[inline(always)]
    fn range(&self, net: usize) -> Range<usize> {
        self.netpin_start[net] as usize..self.netpin_start[net + 1] as usize
    }
}

/// Owned CSR adjacency built from per-net pin lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetPinCsr {
    pub flat_netpin: Vec<i32>,
    pub netpin_start: Vec<i32>,
}

impl Default for NetPinCsr {
    fn default() -> Self {
        Self::new()
    }
}

impl NetPinCsr {
    pub fn new() -> Self {
        Self {
            flat_netpin: Vec::new(),
            netpin_start: vec![0],
        }
    }

    pub fn with_capacity(num_nets: usize, num_incidences: usize) -> Self {
        let mut netpin_start = Vec::with_capacity(num_nets + 1);
        netpin_start.push(0);
        Self {
            flat_netpin: Vec::with_capacity(num_incidences),
            netpin_start,
        }
    }

    /// Appends a net holding `pins` and returns its id. Pin ids and the running
    /// incidence count must fit the `i32` index arrays.
    pub fn push_net(&mut self, pins: &[PinId]) -> Result<NetId> {
        let end = self.flat_netpin.len() + pins.len();
        let end = i32::try_from(end).map_err(|_| {
            WirelengthError::shape(format!("{} incidences exceed the i32 offset range", end))
        })?;
        let mut raw = Vec::with_capacity(pins.len());
        for pin in pins {
            raw.push(i32::try_from(pin.index()).map_err(|_| {
                WirelengthError::shape(format!("{:?} exceeds the i32 index range", pin))
            })?);
        }

        let id = NetId::new(self.num_nets());
        self.flat_netpin.extend(raw);
        self.netpin_start.push(end);
        Ok(id)
    }

    pub fn from_nets<I, P>(nets: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[PinId]>,
    {
        let mut csr = Self::new();
        for pins in nets {
            csr.push_net(pins.as_ref())?;
        }
        Ok(csr)
    }

    /// Groups pins by owning net. Pins stay in ascending order within each net.
    pub fn from_pin_to_net(num_nets: usize, pin_to_net: &[NetId]) -> Result<Self> {
        if i32::try_from(pin_to_net.len()).is_err() {
            return Err(WirelengthError::shape(format!(
                "{} pins exceed the i32 index range",
                pin_to_net.len()
            )));
        }

        let mut start = vec![0usize; num_nets + 1];
        for net in pin_to_net {
            if net.index() >= num_nets {
                return Err(WirelengthError::NetIndex {
                    net: net.index(),
                    num_nets,
                });
            }
            start[net.index() + 1] += 1;
        }
        for i in 1..=num_nets {
            start[i] += start[i - 1];
        }

        let mut fill = start.clone();
        let mut flat_netpin = vec![0i32; pin_to_net.len()];
        for (pin, net) in pin_to_net.iter().enumerate() {
            let slot = &mut fill[net.index()];
            flat_netpin[*slot] = pin as i32;
            *slot += 1;
        }

        Ok(Self {
            flat_netpin,
            netpin_start: start.into_iter().map(|s| s as i32).collect(),
        })
    }

    pub fn num_nets(&self) -> usize {
        self.netpin_start.len().saturating_sub(1)
    }

    /// Checked view; the fields are public, so the offsets are re-validated here.
    pub fn view(&self) -> Result<NetPinView<'_>> {
        NetPinView::new(&self.flat_netpin, &self.netpin_start)
    }
}
