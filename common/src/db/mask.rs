use crate::db::indices::NetId;
use crate::db::netlist::NetPinView;
use crate::error::{Result, WirelengthError};

/// Per-net gate; `false` excludes the net from bounding-box and wirelength evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetMask(Vec<bool>);

impl NetMask {
    pub fn all_active(num_nets: usize) -> Self {
        Self(vec![true; num_nets])
    }

    /// Keeps nets with `2 <= degree < ignore_net_degree`. Single-pin nets carry no
    /// wirelength and very large nets (clock, power) distort the objective.
    pub fn from_degree(view: &NetPinView<'_>, ignore_net_degree: usize) -> Self {
        let mask: Vec<bool> = (0..view.num_nets())
            .map(|i| {
                let degree = view.degree(NetId::new(i));
                degree >= 2 && degree < ignore_net_degree
            })
            .collect();
        let skipped = mask.iter().filter(|&&m| !m).count();
        if skipped > 0 {
            log::debug!(
                "Masked {} of {} nets (degree < 2 or >= {})",
                skipped,
                mask.len(),
                ignore_net_degree
            );
        }
        Self(mask)
    }

    pub fn set(&mut self, net: NetId, active: bool) -> Result<()> {
        let num_nets = self.0.len();
        let slot = self.0.get_mut(net.index()).ok_or(WirelengthError::NetIndex {
            net: net.index(),
            num_nets,
        })?;
        *slot = active;
        Ok(())
    }

    pub fn num_active(&self) -> usize {
        self.0.iter().filter(|&&m| m).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl From<Vec<bool>> for NetMask {
    fn from(mask: Vec<bool>) -> Self {
        Self(mask)
    }
}
