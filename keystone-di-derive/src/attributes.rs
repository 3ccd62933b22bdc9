use convert_case::{Case, Casing};
use proc_macro2::Ident;
use quote::format_ident;
use syn::{Attribute, Error, ExprPath, LitStr, Token};

const SCOPES: [&str; 2] = ["Singleton", "Prototype"];

pub enum DefaultDefinition {
    Default,
    Expr(ExprPath),
}

pub struct FieldAttributes {
    pub name: Option<LitStr>,
    pub default: Option<DefaultDefinition>,
}

impl TryFrom<&Attribute> for FieldAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut name = None;
        let mut default = None;
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if meta.input.peek(Token![=]) {
                    let value = meta.value()?;
                    let expr: LitStr = value.parse()?;
                    default = Some(DefaultDefinition::Expr(expr.parse()?));
                } else {
                    default = Some(DefaultDefinition::Default);
                }
            } else if meta.path.is_ident("name") {
                name = Some(meta.value().and_then(|value| value.parse())?);
            } else {
                return Err(meta.error("Unsupported field attribute!"));
            }

            Ok(())
        })?;

        Ok(Self { name, default })
    }
}

pub struct ComponentAttributes {
    pub name: Option<LitStr>,
    pub scope: Option<Ident>,
}

impl TryFrom<&Attribute> for ComponentAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut name = None;
        let mut scope = None;
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value().and_then(|value| value.parse())?);
            } else if meta.path.is_ident("scope") {
                let value: LitStr = meta.value()?.parse()?;
                let variant = value.value().to_case(Case::Pascal);
                if !SCOPES.contains(&variant.as_str()) {
                    return Err(Error::new(value.span(), "Unknown scope!"));
                }

                scope = Some(format_ident!("{}", variant, span = value.span()));
            } else {
                return Err(meta.error("Unsupported component attribute!"));
            }

            Ok(())
        })?;

        Ok(Self { name, scope })
    }
}
