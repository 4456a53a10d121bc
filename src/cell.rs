//! Standard-cell library: the closed [`CellKind`] enumeration and its static
//! timing parameters.
//!
//! The table is a static lookup: a handful of constants consulted at
//! graph-build time, never mutated.

use serde::Deserialize;

/// Driving resistance (ohms), input capacitance (farads) and intrinsic
/// propagation delay (picoseconds) of a standard cell.
///
/// `delay_ps` is `<= 0` for every sequential kind, so the forward engine can
/// tell a flip-flop apart from a combinational gate without consulting
/// [`CellKind::is_sequential`] at every call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellParams {
    pub delay_ps: i64,
    pub resistance_ohms: f64,
    pub capacitance_farads: f64,
}

/// Fallback parameters used for [`CellKind::Unknown`] and for any kind the
/// library table doesn't otherwise recognise.
pub const DEFAULT_PARAMS: CellParams = CellParams {
    delay_ps: 0,
    resistance_ohms: 100.0,
    capacitance_farads: 0.3e-12,
};

/// The generic, undifferentiated library corner: a gate with no
/// drive-strength suffix.
const GENERIC_RESISTANCE_OHMS: f64 = 150.0;
const GENERIC_CAPACITANCE_FARADS: f64 = 0.4e-12;

/// Closed enumeration of standard-cell kinds recognised by the library.
///
/// Two subsets get special treatment downstream: the *sequential* subset
/// (every flip-flop kind, [`CellKind::is_sequential`]) and the *clock-buffer*
/// subset ([`CellKind::is_clock_buffer`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum CellKind {
    Unknown,
    Not,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    DffP,
    DffPn0,
    Mux,
    And2X2,
    And2X4,
    And3X2,
    And3X4,
    And4X2,
    And4X4,
    Aoi211X2,
    Aoi21X2,
    Aoi21X4,
    Aoi221X2,
    Aoi222X1,
    Aoi222X2,
    Aoi22X2,
    ClkbufX1,
    ClkbufX2,
    DffrX1,
    DffrX2,
    DffsX2,
    DffX1,
    DffX2,
    HaX1,
    InvX1,
    InvX16,
    InvX2,
    InvX32,
    InvX4,
    InvX8,
    Mux2X1,
    Nand2X1,
    Nand2X2,
    Nand2X4,
    Nand3X2,
    Nand3X4,
    Nand4X2,
    Nor2X2,
    Nor2X4,
    Nor3X2,
    Nor3X4,
    Nor4X2,
    Oai211X2,
    Oai21X2,
    Oai221X2,
    Oai222X2,
    Oai22X1,
    Oai22X2,
    Or2X2,
    Or2X4,
    SdffrX2,
    SdffX2,
    Xnor2X2,
    Xor2X2,
}

impl CellKind {
    /// Map a Yosys-style cell type string (e.g. `"$_NAND_"`, `"DFFR_X1"`) to a
    /// [`CellKind`]. Unrecognised strings fall back to [`CellKind::Unknown`]
    /// rather than failing ingestion.
    pub fn from_type_str(type_str: &str) -> Self {
        match type_str {
            "$_NOT_" | "NOT" => CellKind::Not,
            "$_AND_" | "AND" => CellKind::And,
            "$_OR_" | "OR" => CellKind::Or,
            "$_XOR_" | "XOR" => CellKind::Xor,
            "$_NAND_" | "NAND" => CellKind::Nand,
            "$_NOR_" | "NOR" => CellKind::Nor,
            "$_XNOR_" | "XNOR" => CellKind::Xnor,
            "$_MUX_" | "MUX" => CellKind::Mux,
            "$_DFF_P_" | "DFF_P" => CellKind::DffP,
            "$_DFF_PN0_" | "DFF_PN0" => CellKind::DffPn0,
            "AND2_X2" => CellKind::And2X2,
            "AND2_X4" => CellKind::And2X4,
            "AND3_X2" => CellKind::And3X2,
            "AND3_X4" => CellKind::And3X4,
            "AND4_X2" => CellKind::And4X2,
            "AND4_X4" => CellKind::And4X4,
            "AOI211_X2" => CellKind::Aoi211X2,
            "AOI21_X2" => CellKind::Aoi21X2,
            "AOI21_X4" => CellKind::Aoi21X4,
            "AOI221_X2" => CellKind::Aoi221X2,
            "AOI222_X1" => CellKind::Aoi222X1,
            "AOI222_X2" => CellKind::Aoi222X2,
            "AOI22_X2" => CellKind::Aoi22X2,
            "CLKBUF_X1" => CellKind::ClkbufX1,
            "CLKBUF_X2" => CellKind::ClkbufX2,
            "DFFR_X1" => CellKind::DffrX1,
            "DFFR_X2" => CellKind::DffrX2,
            "DFFS_X2" => CellKind::DffsX2,
            "DFF_X1" => CellKind::DffX1,
            "DFF_X2" => CellKind::DffX2,
            "HA_X1" => CellKind::HaX1,
            "INV_X1" => CellKind::InvX1,
            "INV_X16" => CellKind::InvX16,
            "INV_X2" => CellKind::InvX2,
            "INV_X32" => CellKind::InvX32,
            "INV_X4" => CellKind::InvX4,
            "INV_X8" => CellKind::InvX8,
            "MUX2_X1" => CellKind::Mux2X1,
            "NAND2_X1" => CellKind::Nand2X1,
            "NAND2_X2" => CellKind::Nand2X2,
            "NAND2_X4" => CellKind::Nand2X4,
            "NAND3_X2" => CellKind::Nand3X2,
            "NAND3_X4" => CellKind::Nand3X4,
            "NAND4_X2" => CellKind::Nand4X2,
            "NOR2_X2" => CellKind::Nor2X2,
            "NOR2_X4" => CellKind::Nor2X4,
            "NOR3_X2" => CellKind::Nor3X2,
            "NOR3_X4" => CellKind::Nor3X4,
            "NOR4_X2" => CellKind::Nor4X2,
            "OAI211_X2" => CellKind::Oai211X2,
            "OAI21_X2" => CellKind::Oai21X2,
            "OAI221_X2" => CellKind::Oai221X2,
            "OAI222_X2" => CellKind::Oai222X2,
            "OAI22_X1" => CellKind::Oai22X1,
            "OAI22_X2" => CellKind::Oai22X2,
            "OR2_X2" => CellKind::Or2X2,
            "OR2_X4" => CellKind::Or2X4,
            "SDFFR_X2" => CellKind::SdffrX2,
            "SDFF_X2" => CellKind::SdffX2,
            "XNOR2_X2" => CellKind::Xnor2X2,
            "XOR2_X2" => CellKind::Xor2X2,
            _ => CellKind::Unknown,
        }
    }

    /// True for every flip-flop kind. Sequential cells are timing endpoints:
    /// they break the combinational DAG rather than propagating delay through
    /// themselves.
    pub fn is_sequential(self) -> bool {
        matches!(
            self,
            CellKind::DffP
                | CellKind::DffPn0
                | CellKind::DffrX1
                | CellKind::DffrX2
                | CellKind::DffsX2
                | CellKind::DffX1
                | CellKind::DffX2
                | CellKind::SdffrX2
                | CellKind::SdffX2
        )
    }

    /// True for clock-buffer kinds (excluded from arrival/slack reporting —
    /// the clock tree itself is out of scope).
    pub fn is_clock_buffer(self) -> bool {
        matches!(self, CellKind::ClkbufX1 | CellKind::ClkbufX2)
    }

    /// Drive strength implied by the `_X<n>` suffix, `1.0` for ungraded /
    /// generic kinds. Higher drive strength lowers output resistance and
    /// raises input capacitance proportionally, a standard-cell-library rule
    /// of thumb.
    fn drive_strength(self) -> f64 {
        use CellKind::*;
        match self {
            And2X2 | And3X2 | And4X2 | Aoi211X2 | Aoi21X2 | Aoi221X2 | Aoi222X2 | Aoi22X2
            | ClkbufX2 | DffrX2 | DffsX2 | DffX2 | InvX2 | Nand2X2 | Nand3X2 | Nand4X2
            | Nor2X2 | Nor3X2 | Nor4X2 | Oai211X2 | Oai21X2 | Oai221X2 | Oai222X2 | Oai22X2
            | Or2X2 | SdffrX2 | SdffX2 | Xnor2X2 | Xor2X2 => 2.0,
            And2X4 | And3X4 | And4X4 | Aoi21X4 | InvX4 | Nand2X4 | Nand3X4 | Nor2X4 | Nor3X4
            | Or2X4 => 4.0,
            InvX8 => 8.0,
            InvX16 => 16.0,
            InvX32 => 32.0,
            _ => 1.0,
        }
    }

    /// Base (unit-drive) delay, resistance and capacitance for this kind's
    /// gate family, before the drive-strength scaling in [`CellKind::params`]
    /// is applied.
    fn family_base(self) -> (i64, f64, f64) {
        use CellKind::*;
        match self {
            Unknown => (DEFAULT_PARAMS.delay_ps, DEFAULT_PARAMS.resistance_ohms, DEFAULT_PARAMS.capacitance_farads),
            Not => (5, GENERIC_RESISTANCE_OHMS, GENERIC_CAPACITANCE_FARADS),
            And => (9, GENERIC_RESISTANCE_OHMS, GENERIC_CAPACITANCE_FARADS),
            Or => (9, GENERIC_RESISTANCE_OHMS, GENERIC_CAPACITANCE_FARADS),
            Xor => (12, GENERIC_RESISTANCE_OHMS, GENERIC_CAPACITANCE_FARADS),
            Nand => (13, GENERIC_RESISTANCE_OHMS, GENERIC_CAPACITANCE_FARADS),
            Nor => (12, GENERIC_RESISTANCE_OHMS, GENERIC_CAPACITANCE_FARADS),
            Xnor => (12, GENERIC_RESISTANCE_OHMS, GENERIC_CAPACITANCE_FARADS),
            Mux => (11, GENERIC_RESISTANCE_OHMS, GENERIC_CAPACITANCE_FARADS),
            DffP | DffPn0 => (-1, 90.0, 0.35e-12),

            InvX1 | InvX2 | InvX4 | InvX8 | InvX16 | InvX32 => (4, 200.0, 0.3e-12),
            ClkbufX1 | ClkbufX2 => (3, 120.0, 0.5e-12),

            And2X2 | And2X4 => (8, 180.0, 0.35e-12),
            And3X2 | And3X4 => (10, 180.0, 0.4e-12),
            And4X2 | And4X4 => (11, 180.0, 0.45e-12),
            Or2X2 | Or2X4 => (8, 180.0, 0.35e-12),
            Nand2X1 | Nand2X2 | Nand2X4 => (6, 160.0, 0.3e-12),
            Nand3X2 | Nand3X4 => (8, 160.0, 0.35e-12),
            Nand4X2 => (9, 160.0, 0.4e-12),
            Nor2X2 | Nor2X4 => (7, 170.0, 0.3e-12),
            Nor3X2 | Nor3X4 => (9, 170.0, 0.35e-12),
            Nor4X2 => (10, 170.0, 0.4e-12),
            Xor2X2 => (12, 190.0, 0.4e-12),
            Xnor2X2 => (12, 190.0, 0.4e-12),
            Mux2X1 => (11, 190.0, 0.4e-12),
            HaX1 => (14, 190.0, 0.45e-12),

            Aoi21X2 | Aoi21X4 => (9, 170.0, 0.35e-12),
            Aoi22X2 => (10, 170.0, 0.4e-12),
            Aoi211X2 => (11, 170.0, 0.4e-12),
            Aoi221X2 => (12, 170.0, 0.45e-12),
            Aoi222X1 | Aoi222X2 => (13, 170.0, 0.5e-12),
            Oai21X2 => (9, 170.0, 0.35e-12),
            Oai22X1 | Oai22X2 => (10, 170.0, 0.4e-12),
            Oai211X2 => (11, 170.0, 0.4e-12),
            Oai221X2 => (12, 170.0, 0.45e-12),
            Oai222X2 => (13, 170.0, 0.5e-12),

            DffrX1 | DffrX2 => (-1, 85.0, 0.35e-12),
            DffsX2 => (-1, 85.0, 0.35e-12),
            DffX1 | DffX2 => (-1, 90.0, 0.35e-12),
            SdffrX2 | SdffX2 => (-1, 95.0, 0.4e-12),
        }
    }

    /// The timing triple `(d_cell, R, C)` this library associates with the
    /// kind, drive-strength scaled.
    ///
    /// Sequential kinds keep `delay_ps` at its `<= 0` sentinel and are not
    /// drive-scaled: a flip-flop's Q output resistance still matters for the
    /// edges leaving it, but its own "delay" never enters a combinational
    /// sum.
    pub fn params(self) -> CellParams {
        let (delay_ps, base_r, base_c) = self.family_base();
        let drive = self.drive_strength();
        CellParams {
            delay_ps,
            resistance_ohms: base_r / drive,
            capacitance_farads: base_c * drive,
        }
    }
}
