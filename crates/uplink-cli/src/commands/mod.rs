pub mod decode;
pub mod new;
pub mod now;
pub mod script;
pub mod uid;

use clap::ValueEnum;
use uplink_meta::codec::to_msgpack;
use uplink_meta::config::WireFormat;
use uplink_meta::{CmdMetaError, WireMap};

/// `--format` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Msgpack,
}

impl From<FormatArg> for WireFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => WireFormat::Json,
            FormatArg::Msgpack => WireFormat::Msgpack,
        }
    }
}

/// Render a mapping as compact JSON or as hex-encoded MessagePack
pub fn render(map: &WireMap, format: WireFormat) -> uplink_meta::Result<String> {
    match format {
        WireFormat::Json => Ok(map.to_string()),
        WireFormat::Msgpack => Ok(hex::encode(to_msgpack(map)?)),
    }
}

/// clap value parser for opcodes given as decimal or `0x` hex
pub fn parse_apid_arg(text: &str) -> Result<u32, String> {
    uplink_meta::script::parse_apid(text).map_err(|e| e.to_string())
}

pub fn decode_hex(field: &'static str, text: &str) -> uplink_meta::Result<Vec<u8>> {
    hex::decode(text.trim()).map_err(|e| CmdMetaError::InvalidInput {
        field,
        reason: format!("invalid hex: {}", e),
    })
}
