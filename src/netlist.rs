//! Netlist ingestion and in-memory circuit model.
//!
//! Reads the synthesis-tool JSON and produces the [`Netlist`] the rest of
//! the engine consumes, the way `serde_json` is used elsewhere to
//! deserialize JSON-shaped IR into typed structs — except here the
//! structural shape (cells/ports/netnames objects) is typed while individual
//! `bits` entries stay as raw [`serde_json::Value`] so a single malformed bit
//! can be skipped without failing the whole parse.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Identifier of a net, as given by the synthesis tool. Not necessarily
/// dense or contiguous — downstream code must not assume it is.
pub type NetId = u32;

use crate::cell::CellKind;

/// A driver gate instance.
///
/// `id` is the `NetId` of the cell's first declared output bit (lowest index
/// in the declared output-bit list breaks ties) — every output net in the
/// netlist is the `id` of exactly one `Cell`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub id: NetId,
    pub inputs: Vec<NetId>,
    pub outputs: Vec<NetId>,
    pub delay_ps: i64,
    pub resistance_ohms: f64,
    pub capacitance_farads: f64,
}

/// The parsed, in-memory netlist.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    cells: Vec<Cell>,
    primary_inputs: Vec<NetId>,
    primary_outputs: Vec<NetId>,
    clock_net: Option<NetId>,
    net_names: HashMap<NetId, String>,
    driver_index: HashMap<NetId, usize>,
}

impl Netlist {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell driving `net`, if any. Primary-input nets have none.
    pub fn driver(&self, net: NetId) -> Option<&Cell> {
        self.driver_index.get(&net).map(|&i| &self.cells[i])
    }

    pub fn primary_inputs(&self) -> &[NetId] {
        &self.primary_inputs
    }

    pub fn primary_outputs(&self) -> &[NetId] {
        &self.primary_outputs
    }

    pub fn clock_net(&self) -> Option<NetId> {
        self.clock_net
    }

    pub fn net_name(&self, net: NetId) -> Option<&str> {
        self.net_names.get(&net).map(String::as_str)
    }
}

#[derive(Deserialize, Default)]
struct RawModule {
    #[serde(default)]
    cells: serde_json::Map<String, Value>,
    #[serde(default)]
    ports: serde_json::Map<String, Value>,
    #[serde(default)]
    netnames: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
struct RawCell {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    port_directions: serde_json::Map<String, Value>,
    #[serde(default)]
    connections: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
struct RawPort {
    direction: String,
    #[serde(default)]
    bits: Vec<Value>,
}

#[derive(Deserialize)]
struct RawNetname {
    #[serde(default)]
    bits: Vec<Value>,
}

/// Read a non-negative integer bit out of a raw JSON value, warning and
/// returning `None` on anything else rather than failing ingestion.
fn bit_as_net_id(context: &str, bit: &Value) -> Option<NetId> {
    match bit.as_i64() {
        Some(v) if v >= 0 => Some(v as NetId),
        _ => {
            tracing::warn!(%context, bit = %bit, "non-integer net bit, skipping");
            None
        }
    }
}

#[derive(Default)]
struct NetlistBuilder {
    cells: Vec<Cell>,
    primary_inputs: Vec<NetId>,
    primary_outputs: Vec<NetId>,
    clock_net: Option<NetId>,
    net_names: HashMap<NetId, String>,
}

impl NetlistBuilder {
    fn ingest_module(&mut self, module: RawModule) {
        for (cell_name, cell_value) in module.cells.iter() {
            match serde_json::from_value::<RawCell>(cell_value.clone()) {
                Ok(raw) => self.ingest_cell(cell_name, raw),
                Err(err) => {
                    tracing::warn!(cell = %cell_name, %err, "skipping malformed cell");
                }
            }
        }
        for (port_name, port_value) in module.ports.iter() {
            match serde_json::from_value::<RawPort>(port_value.clone()) {
                Ok(raw) => self.ingest_port(port_name, raw),
                Err(err) => {
                    tracing::warn!(port = %port_name, %err, "skipping malformed port");
                }
            }
        }
        for (net_name, netname_value) in module.netnames.iter() {
            match serde_json::from_value::<RawNetname>(netname_value.clone()) {
                Ok(raw) => self.ingest_netname(net_name, raw),
                Err(err) => {
                    tracing::warn!(net = %net_name, %err, "skipping malformed netname");
                }
            }
        }
    }

    fn ingest_cell(&mut self, name: &str, raw: RawCell) {
        let kind = CellKind::from_type_str(&raw.type_);
        let is_sequential = kind.is_sequential();

        let mut inputs = Vec::new();
        let mut outputs = Vec::new();

        for (port_name, bits_value) in raw.connections.iter() {
            let Some(direction) = raw.port_directions.get(port_name).and_then(Value::as_str)
            else {
                tracing::warn!(cell = %name, port = %port_name, "cell missing port_directions entry, skipping port");
                continue;
            };
            let Some(bits) = bits_value.as_array() else {
                tracing::warn!(cell = %name, port = %port_name, "connections entry is not an array, skipping port");
                continue;
            };
            let context = format!("cell {name} port {port_name}");
            let net_ids = bits.iter().filter_map(|b| bit_as_net_id(&context, b));

            match direction {
                "input" => {
                    if is_sequential && port_name == "C" {
                        for net in net_ids {
                            self.clock_net = Some(net);
                        }
                    } else {
                        inputs.extend(net_ids);
                    }
                }
                "output" => outputs.extend(net_ids),
                other => {
                    tracing::warn!(cell = %name, port = %port_name, direction = %other, "unrecognised port direction, skipping");
                }
            }
        }

        let Some(&id) = outputs.first() else {
            tracing::warn!(cell = %name, "cell drives no output net, skipping");
            return;
        };

        let params = kind.params();
        self.cells.push(Cell {
            kind,
            id,
            inputs,
            outputs,
            delay_ps: params.delay_ps,
            resistance_ohms: params.resistance_ohms,
            capacitance_farads: params.capacitance_farads,
        });
    }

    fn ingest_port(&mut self, name: &str, raw: RawPort) {
        let context = format!("port {name}");
        for bit in &raw.bits {
            let Some(net) = bit_as_net_id(&context, bit) else {
                continue;
            };
            match raw.direction.as_str() {
                "input" => self.primary_inputs.push(net),
                "output" => self.primary_outputs.push(net),
                other => {
                    tracing::warn!(port = %name, direction = %other, "unrecognised port direction, skipping");
                }
            }
        }
    }

    fn ingest_netname(&mut self, name: &str, raw: RawNetname) {
        let context = format!("netname {name}");
        let len = raw.bits.len();
        for (i, bit) in raw.bits.iter().enumerate() {
            let Some(net) = bit_as_net_id(&context, bit) else {
                continue;
            };
            let label = if len == 1 {
                name.to_string()
            } else {
                format!("{name}[{i}]")
            };
            self.net_names.insert(net, label);
        }
    }

    fn finish(mut self) -> Netlist {
        if let Some(clk) = self.clock_net {
            self.primary_inputs.retain(|&n| n != clk);
        }

        let mut driver_index = HashMap::with_capacity(self.cells.len());
        for (i, cell) in self.cells.iter().enumerate() {
            // Every output net is the `id` of exactly one cell; first
            // writer wins if malformed input violates that.
            driver_index.entry(cell.id).or_insert(i);
        }

        Netlist {
            cells: self.cells,
            primary_inputs: self.primary_inputs,
            primary_outputs: self.primary_outputs,
            clock_net: self.clock_net,
            net_names: self.net_names,
            driver_index,
        }
    }
}

/// Parse the synthesis-tool JSON into a [`Netlist`].
///
/// Top-level `modules` are processed in declaration order and merged into a
/// single netlist via one shared accumulator. A module missing entirely, or
/// a `modules` object missing outright, is logged and treated as
/// contributing nothing rather than aborting the run — only
/// [`crate::error::StaError::CyclicGraph`] is fatal.
pub fn parse_netlist(json_text: &str) -> anyhow::Result<Netlist> {
    let root: Value = serde_json::from_str(json_text)?;

    let Some(modules) = root.get("modules").and_then(Value::as_object) else {
        tracing::warn!("input JSON has no top-level `modules` object");
        return Ok(Netlist::default());
    };

    let mut builder = NetlistBuilder::default();
    for (module_name, module_value) in modules.iter() {
        match serde_json::from_value::<RawModule>(module_value.clone()) {
            Ok(module) => builder.ingest_module(module),
            Err(err) => {
                tracing::warn!(module = %module_name, %err, "skipping malformed module");
            }
        }
    }

    Ok(builder.finish())
}
