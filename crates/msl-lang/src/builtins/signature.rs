/// How a builtin SQF command consumes its operands.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CallConvention {
    /// A zero-operand keyword (`player`, `allUnits`). Arguments at the MSL
    /// call site are dropped from the output.
    Bare,
    /// A unary command taking one right operand (`hint "hi"`, `count units`).
    Prefix,
    /// A binary operator form with a left and right operand
    /// (`unit setDamage 1`).
    Infix,
}

/// Signature of a builtin command.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BuiltinSignature {
    name: String,
    convention: CallConvention,
}

impl BuiltinSignature {
    pub fn new(name: impl Into<String>, convention: CallConvention) -> Self {
        Self {
            name: name.into(),
            convention,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn convention(&self) -> CallConvention {
        self.convention
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_accessors() {
        let sig = BuiltinSignature::new("hint", CallConvention::Prefix);
        assert_eq!(sig.name(), "hint");
        assert_eq!(sig.convention(), CallConvention::Prefix);
    }

    #[test]
    fn convention_equality() {
        assert_eq!(CallConvention::Bare, CallConvention::Bare);
        assert_ne!(CallConvention::Prefix, CallConvention::Infix);
    }
}
