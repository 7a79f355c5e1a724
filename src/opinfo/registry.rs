use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use once_cell::sync::{Lazy, OnceCell};

use crate::dtype::DataLayout;

use super::info::OpInfo;
use super::softmax::softmax_op_info;

/// Table of kernel registration records keyed by operator name.
///
/// Records are inserted once during process initialization and immutable
/// afterwards; lookups hand out shared references for the process lifetime.
#[derive(Debug, Default)]
pub struct OpRegistry {
    entries: RwLock<HashMap<String, Arc<OpInfo>>>,
}

impl OpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, rejecting duplicate operator names.
    pub fn register(&self, info: OpInfo) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("op registry lock poisoned"))?;
        if entries.contains_key(&info.op_name) {
            crate::warning!("duplicate op info registration for {}", info.op_name);
            return Err(anyhow!("op {} already registered", info.op_name));
        }
        crate::trace!(
            "registered op info {} -> {} ({} signatures)",
            info.op_name,
            info.kernel_name,
            info.dtype_formats.len()
        );
        entries.insert(info.op_name.clone(), Arc::new(info));
        Ok(())
    }

    pub fn lookup(&self, op_name: &str) -> Option<Arc<OpInfo>> {
        self.entries.read().ok()?.get(op_name).cloned()
    }

    pub fn is_registered(&self, op_name: &str) -> bool {
        self.lookup(op_name).is_some()
    }

    /// Output layout the registered kernel produces for `input`, if any.
    pub fn select_layout(&self, op_name: &str, input: DataLayout) -> Option<DataLayout> {
        self.lookup(op_name)?.supported_output(input)
    }

    pub fn all_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match self.entries.read() {
            Ok(entries) => entries.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

static GLOBAL: Lazy<OpRegistry> = Lazy::new(OpRegistry::new);
static BUILTINS: OnceCell<()> = OnceCell::new();

/// Register a record in the process-wide table.
pub fn register(info: OpInfo) -> Result<()> {
    GLOBAL.register(info)
}

pub fn lookup(op_name: &str) -> Option<Arc<OpInfo>> {
    GLOBAL.lookup(op_name)
}

pub fn is_registered(op_name: &str) -> bool {
    GLOBAL.is_registered(op_name)
}

pub fn select_layout(op_name: &str, input: DataLayout) -> Option<DataLayout> {
    GLOBAL.select_layout(op_name, input)
}

pub fn all_names() -> Vec<String> {
    GLOBAL.all_names()
}

/// Register the built-in kernel records.
///
/// Safe to call from every init path; only the first call inserts.
pub fn register_builtins() -> Result<()> {
    BUILTINS
        .get_or_try_init(|| {
            GLOBAL.register(softmax_op_info()?)?;
            crate::trace!("builtin op info registration complete");
            Ok::<(), anyhow::Error>(())
        })
        .map(|_| ())
}
