use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::dtype::DataLayout;

/// How the compiler may merge a kernel with its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FusionType {
    /// Never fused; the kernel is a black box to the fusion pass.
    #[serde(rename = "OPAQUE")]
    Opaque,
    #[serde(rename = "ELEMWISE")]
    ElemWise,
    #[serde(rename = "COMMREDUCE")]
    CommReduce,
    #[serde(rename = "CONVOLUTION")]
    Convolution,
    #[serde(rename = "SEGMENT")]
    Segment,
}

/// Whether a parameter or attribute must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Required,
    Optional,
    Dynamic,
}

/// Value type of a declared operator attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "listInt")]
    ListInt,
    #[serde(rename = "listFloat")]
    ListFloat,
}

/// Declared operator attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrDef {
    pub name: String,
    pub param_type: ParamType,
    pub value_type: AttrType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Declared input or output tensor parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoDef {
    pub index: usize,
    pub name: String,
    pub param_type: ParamType,
    #[serde(default)]
    pub need_compile: bool,
    /// Shape selector understood by the kernel compiler ("all" accepts any).
    pub shape: String,
}

/// Registration record for one accelerated kernel implementation.
///
/// Declares which compiled binary implements a named operator, which
/// (precision, format) signatures that binary supports, and the dispatch
/// hints the compiler consults when lowering a matching node. Constructed
/// once via [`OpInfo::builder`], registered into the process-wide table, and
/// never mutated afterwards. The record performs no computation itself; the
/// cost and fusion hints are stored verbatim and interpreted by the
/// compiler's dispatch stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpInfo {
    pub op_name: String,
    pub kernel_name: String,
    pub binfile_name: String,
    pub fusion_type: FusionType,
    pub async_flag: bool,
    pub compute_cost: u32,
    pub partial_flag: bool,
    #[serde(default)]
    pub attrs: Vec<AttrDef>,
    pub inputs: Vec<IoDef>,
    pub outputs: Vec<IoDef>,
    pub dtype_formats: Vec<(DataLayout, DataLayout)>,
}

impl OpInfo {
    pub fn builder(op_name: impl Into<String>) -> OpInfoBuilder {
        OpInfoBuilder::new(op_name)
    }

    /// Output layout this kernel produces for `input`, if supported.
    pub fn supported_output(&self, input: DataLayout) -> Option<DataLayout> {
        self.dtype_formats
            .iter()
            .find(|(in_layout, _)| *in_layout == input)
            .map(|(_, out_layout)| *out_layout)
    }

    pub fn supports(&self, input: DataLayout) -> bool {
        self.supported_output(input).is_some()
    }

    pub fn attr(&self, name: &str) -> Option<&AttrDef> {
        self.attrs.iter().find(|attr| attr.name == name)
    }

    /// Serialize to the JSON interchange form consumed by the kernel compiler.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builder for [`OpInfo`]; required fields are validated at [`build`].
///
/// [`build`]: OpInfoBuilder::build
#[derive(Debug, Clone)]
pub struct OpInfoBuilder {
    op_name: String,
    kernel_name: Option<String>,
    binfile_name: Option<String>,
    fusion_type: FusionType,
    async_flag: bool,
    compute_cost: u32,
    partial_flag: bool,
    attrs: Vec<AttrDef>,
    inputs: Vec<IoDef>,
    outputs: Vec<IoDef>,
    dtype_formats: Vec<(DataLayout, DataLayout)>,
}

impl OpInfoBuilder {
    pub fn new(op_name: impl Into<String>) -> Self {
        Self {
            op_name: op_name.into(),
            kernel_name: None,
            binfile_name: None,
            fusion_type: FusionType::Opaque,
            async_flag: false,
            compute_cost: 10,
            partial_flag: false,
            attrs: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            dtype_formats: Vec::new(),
        }
    }

    pub fn kernel_name(mut self, name: impl Into<String>) -> Self {
        self.kernel_name = Some(name.into());
        self
    }

    pub fn binfile_name(mut self, name: impl Into<String>) -> Self {
        self.binfile_name = Some(name.into());
        self
    }

    pub fn fusion_type(mut self, fusion_type: FusionType) -> Self {
        self.fusion_type = fusion_type;
        self
    }

    pub fn async_flag(mut self, async_flag: bool) -> Self {
        self.async_flag = async_flag;
        self
    }

    pub fn compute_cost(mut self, cost: u32) -> Self {
        self.compute_cost = cost;
        self
    }

    pub fn partial_flag(mut self, partial_flag: bool) -> Self {
        self.partial_flag = partial_flag;
        self
    }

    pub fn attr(
        mut self,
        name: impl Into<String>,
        param_type: ParamType,
        value_type: AttrType,
        default_value: Option<&str>,
    ) -> Self {
        self.attrs.push(AttrDef {
            name: name.into(),
            param_type,
            value_type,
            default_value: default_value.map(str::to_string),
        });
        self
    }

    pub fn input(mut self, index: usize, name: impl Into<String>, param_type: ParamType) -> Self {
        self.inputs.push(IoDef {
            index,
            name: name.into(),
            param_type,
            need_compile: false,
            shape: "all".to_string(),
        });
        self
    }

    pub fn output(mut self, index: usize, name: impl Into<String>, param_type: ParamType) -> Self {
        self.outputs.push(IoDef {
            index,
            name: name.into(),
            param_type,
            need_compile: false,
            shape: "all".to_string(),
        });
        self
    }

    /// Declare one supported (input layout, output layout) signature.
    pub fn dtype_format(mut self, input: DataLayout, output: DataLayout) -> Self {
        self.dtype_formats.push((input, output));
        self
    }

    pub fn build(self) -> Result<OpInfo> {
        if self.op_name.trim().is_empty() {
            return Err(anyhow!("op info missing operator name"));
        }
        let kernel_name = self
            .kernel_name
            .ok_or_else(|| anyhow!("op info for {} missing kernel name", self.op_name))?;
        let binfile_name = self
            .binfile_name
            .ok_or_else(|| anyhow!("op info for {} missing binfile name", self.op_name))?;
        if self.inputs.is_empty() {
            return Err(anyhow!("op info for {} declares no inputs", self.op_name));
        }
        if self.outputs.is_empty() {
            return Err(anyhow!("op info for {} declares no outputs", self.op_name));
        }
        if self.dtype_formats.is_empty() {
            return Err(anyhow!(
                "op info for {} declares no dtype/format pairs",
                self.op_name
            ));
        }
        for (pos, attr) in self.attrs.iter().enumerate() {
            if self.attrs[..pos].iter().any(|prev| prev.name == attr.name) {
                return Err(anyhow!(
                    "op info for {} declares duplicate attribute {}",
                    self.op_name,
                    attr.name
                ));
            }
        }
        check_io_indices(&self.op_name, "input", &self.inputs)?;
        check_io_indices(&self.op_name, "output", &self.outputs)?;
        Ok(OpInfo {
            op_name: self.op_name,
            kernel_name,
            binfile_name,
            fusion_type: self.fusion_type,
            async_flag: self.async_flag,
            compute_cost: self.compute_cost,
            partial_flag: self.partial_flag,
            attrs: self.attrs,
            inputs: self.inputs,
            outputs: self.outputs,
            dtype_formats: self.dtype_formats,
        })
    }
}

fn check_io_indices(op_name: &str, kind: &str, params: &[IoDef]) -> Result<()> {
    for (pos, param) in params.iter().enumerate() {
        if param.index != pos {
            return Err(anyhow!(
                "op info for {} has {} {} at index {}, expected {}",
                op_name,
                kind,
                param.name,
                param.index,
                pos
            ));
        }
    }
    Ok(())
}
