use crate::attributes::{ComponentAttributes, DefaultDefinition, FieldAttributes};
use itertools::Itertools;
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DataStruct, DeriveInput, Error, Field, Fields, Result};

const COMPONENT: &str = "component";

struct FieldInjection {
    construction: TokenStream,
    dependency: Option<TokenStream>,
}

fn extract_field_attributes(field: &Field) -> Result<Option<FieldAttributes>> {
    field
        .attrs
        .iter()
        .find(|attribute| attribute.path().is_ident(COMPONENT))
        .map(FieldAttributes::try_from)
        .transpose()
}

fn generate_injection(field: &Field, index: usize) -> Result<FieldInjection> {
    let attributes = extract_field_attributes(field)?;
    let ty = &field.ty;

    match attributes {
        Some(FieldAttributes {
            default: Some(DefaultDefinition::Expr(path)),
            ..
        }) => Ok(FieldInjection {
            construction: quote!(#path()),
            dependency: None,
        }),
        Some(FieldAttributes {
            default: Some(DefaultDefinition::Default),
            ..
        }) => Ok(FieldInjection {
            construction: quote!(std::default::Default::default()),
            dependency: None,
        }),
        attributes => {
            let dependency = match attributes.and_then(|attributes| attributes.name) {
                Some(name) => quote! {
                    keystone_di::class_registry::Dependency::from(#name)
                },
                None => quote! {
                    keystone_di::class_registry::Dependency::from(
                        <<#ty as std::ops::Deref>::Target as keystone_di::component::Component>::identifier()
                    )
                },
            };

            Ok(FieldInjection {
                construction: quote! {
                    arguments.get::<<#ty as std::ops::Deref>::Target>(#index)?
                },
                dependency: Some(dependency),
            })
        }
    }
}

// Injected fields get consecutive argument positions, skipping default-initialized ones.
fn generate_injections<'a, I: Iterator<Item = &'a Field>>(
    fields: I,
) -> Result<Vec<FieldInjection>> {
    let mut index = 0;
    fields
        .map(|field| -> Result<FieldInjection> {
            let injection = generate_injection(field, index)?;
            if injection.dependency.is_some() {
                index += 1;
            }

            Ok(injection)
        })
        .try_collect()
}

fn extract_component_attributes(attributes: &[Attribute]) -> Result<Option<ComponentAttributes>> {
    attributes
        .iter()
        .find(|attribute| attribute.path().is_ident(COMPONENT))
        .map(ComponentAttributes::try_from)
        .transpose()
}

pub fn expand_component(input: &DeriveInput) -> Result<TokenStream> {
    if let Data::Struct(DataStruct { fields, .. }) = &input.data {
        let ident = &input.ident;
        let injections = generate_injections(fields.iter())?;

        let constructions = injections
            .iter()
            .map(|injection| &injection.construction)
            .collect_vec();
        let dependencies = injections
            .iter()
            .filter_map(|injection| injection.dependency.as_ref())
            .collect_vec();

        let generation = match fields {
            Fields::Named(fields) => {
                let idents = fields.named.iter().map(|field| &field.ident);
                quote! {
                    Self {
                        #(#idents: #constructions),*
                    }
                }
            }
            Fields::Unnamed(_) => quote! {
                Self(#(#constructions),*)
            },
            Fields::Unit => quote! { Self },
        };

        let attributes = extract_component_attributes(&input.attrs)?;
        let (name, scope) = attributes
            .map(|attributes| (attributes.name, attributes.scope))
            .unwrap_or_default();

        let identifier = name
            .map(|name| quote!(#name))
            .unwrap_or_else(|| quote!(concat!(module_path!(), "::", stringify!(#ident))));
        let scope = scope
            .map(|scope| {
                quote! {
                    fn scope() -> keystone_di::scope::Scope {
                        keystone_di::scope::Scope::#scope
                    }
                }
            })
            .unwrap_or_default();

        Ok(quote! {
            #[automatically_derived]
            impl keystone_di::component::Component for #ident {
                fn identifier() -> &'static str {
                    #identifier
                }

                fn dependencies() -> Vec<keystone_di::class_registry::Dependency> {
                    vec![#(#dependencies),*]
                }

                #scope

                #[allow(unused_variables)]
                fn create(arguments: &keystone_di::instance::Arguments) -> Result<Self, keystone_di::error::ConstructionError> {
                    Ok(#generation)
                }
            }

            const _: () = {
                fn register() -> keystone_di::class_registry::ClassDefinition {
                    keystone_di::class_registry::ClassDefinition::of::<#ident>()
                }

                keystone_di::class_registry::internal::submit! {
                    keystone_di::class_registry::internal::ClassDefinitionRegisterer {
                        register
                    }
                };
            };
        })
    } else {
        Err(Error::new(
            input.span(),
            "Can only derive Component on structs!",
        ))
    }
}
