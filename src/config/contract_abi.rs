use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Address, Bytes, U256};
use std::path::Path;

use crate::error::{BotError, Result};

/// The wrap contract's ABI, validated to expose `wrap(amount, recipient)`.
#[derive(Debug, Clone)]
pub struct WrapAbi {
    abi: JsonAbi,
    function: Function,
}

impl WrapAbi {
    pub fn from_json(text: &str) -> Result<WrapAbi> {
        let abi: JsonAbi = serde_json::from_str(text)?;
        let function = abi
            .function("wrap")
            .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == 2))
            .cloned()
            .ok_or_else(|| BotError::Abi("no wrap(amount, recipient) function in ABI".into()))?;

        let types: Vec<&str> = function.inputs.iter().map(|p| p.ty.as_str()).collect();
        if types != ["uint256", "address"] {
            return Err(BotError::Abi(format!(
                "wrap has unexpected inputs ({}), expected (uint256,address)",
                types.join(",")
            )));
        }
        Ok(WrapAbi { abi, function })
    }

    pub fn load(path: &Path) -> Result<WrapAbi> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn signature(&self) -> String {
        self.function.signature()
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// ABI-encodes calldata (selector included) for `wrap(amount, recipient)`.
    pub fn encode(&self, amount: U256, recipient: Address) -> Result<Bytes> {
        encode_call(&self.function, &wrap_args(amount, recipient))
    }
}

pub fn wrap_args(amount: U256, recipient: Address) -> Vec<DynSolValue> {
    vec![DynSolValue::Uint(amount, 256), DynSolValue::Address(recipient)]
}

/// Encodes a call to `method`, picking the overload whose arity matches `args`.
pub fn encode_method(abi: &JsonAbi, method: &str, args: &[DynSolValue]) -> Result<Bytes> {
    let function = abi
        .function(method)
        .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == args.len()))
        .ok_or_else(|| {
            BotError::Abi(format!("no {} function taking {} argument(s)", method, args.len()))
        })?;
    encode_call(function, args)
}

pub fn encode_call(function: &Function, args: &[DynSolValue]) -> Result<Bytes> {
    function
        .abi_encode_input(args)
        .map(Bytes::from)
        .map_err(|e| BotError::Abi(format!("failed to encode {}: {}", function.name, e)))
}
