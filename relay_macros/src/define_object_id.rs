use super::*;

use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, token, Ident, Result, Token, TypeTuple};
use syn::parse::{Parse, ParseStream};

mod kw {
    syn::custom_keyword!(snowflake);
}

struct ObjectIdDefn {
    typename: Ident,
    _colon: Token![:],
    contents: TypeTuple,
    is_snowflake: Option<kw::snowflake>,
    _semi: Token![;],
}

impl Parse for ObjectIdDefn {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            typename: input.parse()?,
            _colon: input.parse()?,
            contents: if input.peek(kw::snowflake) {
                syn::parse_str("(Snowflake,)")?
            } else {
                input.parse()?
            },
            is_snowflake: input.parse()?,
            _semi: input.parse()?,
        })
    }
}

struct ObjectIdList {
    enum_name: Ident,
    _brace: token::Brace,
    items: Vec<ObjectIdDefn>,
}

impl Parse for ObjectIdList {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut items = Vec::new();
        let enum_name = input.parse()?;

        let content;
        let _brace = syn::braced!(content in input);

        while !content.is_empty() {
            items.push(content.parse::<ObjectIdDefn>()?);
        }

        Ok(Self {
            enum_name,
            _brace,
            items,
        })
    }
}

pub fn object_ids(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ObjectIdList);

    let mut output = proc_macro2::TokenStream::new();
    let enum_name = input.enum_name;
    let mut enum_variants = Vec::new();

    for item in input.items {
        let typename = item.typename;
        let id_typename = Ident::new(&format!("{}Id", typename), Span::call_site());
        let contents = item.contents;

        let mut arg_names = Vec::new();
        let mut arg_list = Vec::new();

        for (argtype, n) in contents.elems.iter().zip(1..) {
            let argname = Ident::new(&format!("arg{}", n), Span::call_site());
            arg_names.push(argname.clone());
            arg_list.push(quote!(#argname: #argtype));
        }

        enum_variants.push(quote!(
            #typename(#id_typename)
        ));

        let single = contents.elems.len() == 1;
        let transparent = if single { quote!(#[serde(transparent)]) } else { quote!() };

        output.extend(quote!(
            #[derive(PartialEq,Eq,PartialOrd,Ord,Hash,Debug,Clone,Copy,serde::Serialize,serde::Deserialize)]
            #transparent
            pub struct #id_typename #contents;

            impl #id_typename
            {
                pub const fn new(#( #arg_list ),*) -> Self { Self(#( #arg_names ), *) }
            }

            impl From<#id_typename> for #enum_name
            {
                fn from(id: #id_typename) -> Self {
                    Self::#typename(id)
                }
            }

            impl std::convert::TryFrom<#enum_name> for #id_typename
            {
                type Error = WrongIdTypeError;

                fn try_from(id: #enum_name) -> Result<Self, WrongIdTypeError> {
                    match id {
                        #enum_name::#typename(x) => Ok(x),
                        #[allow(unreachable_patterns)]
                        _ => Err(WrongIdTypeError)
                    }
                }
            }
        ));

        // Single-valued IDs are thin wrappers; let them convert, deref, print and
        // parse as their contents do
        if let Some(inner_type) = contents.elems.first().filter(|_| single) {
            output.extend(quote!(
                impl std::convert::From<#inner_type> for #id_typename {
                    fn from(val: #inner_type) -> Self { Self(val) }
                }

                impl std::ops::Deref for #id_typename {
                    type Target = #inner_type;
                    fn deref(&self) -> &#inner_type { &self.0 }
                }

                impl std::fmt::Display for #id_typename {
                    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        std::fmt::Display::fmt(&self.0, f)
                    }
                }

                impl std::str::FromStr for #id_typename {
                    type Err = <#inner_type as std::str::FromStr>::Err;

                    fn from_str(s: &str) -> Result<Self, Self::Err> {
                        s.parse().map(Self)
                    }
                }
            ));
        }

        if item.is_snowflake.is_some() {
            output.extend(quote!(
                impl std::convert::From<u64> for #id_typename {
                    fn from(raw: u64) -> Self { Self(Snowflake::new(raw)) }
                }
            ));
        }
    }

    output.extend(quote!(
        #[derive(PartialEq,Eq,Hash,Debug,Clone,Copy,serde::Serialize,serde::Deserialize)]
        pub enum #enum_name {
            #( #enum_variants ),*
        }
    ));

    output.into()
}
