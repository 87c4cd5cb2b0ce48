// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::visit_mut::{self, VisitMut};
use syn::{
    parse_macro_input, Data, DeriveInput, Fields, GenericParam, Ident, LitStr, Path, Type,
    WherePredicate,
};

/// Registration data for one field.
struct FieldInfo {
    ident: Ident,
    ty: Type,
    /// Registered name (`#[reflect(rename = "...")]` or the field ident).
    name: String,
    /// Alternative in the generated catalogue enum.
    variant: Ident,
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<String>,
}

/// `#[derive(Reflect)]`: registers every named field, in declaration order
///
/// Generates:
/// - a catalogue enum `<Type>Field` with one `TypeCarrier<FT>` alternative per field,
/// - `unsafe impl Reflect` (placeholder table + process-wide registry),
/// - one `unsafe impl FieldAt<I>` per field.
///
/// Field attributes:
/// - `#[reflect(skip)]`: leave the field out (ordinals close up)
/// - `#[reflect(rename = "name")]`: register under another name
///
/// Container attribute:
/// - `#[reflect(catalogue = MyName)]`: name of the generated enum
///
/// # Panics
///
/// Never panics; unsupported input (generics, tuple/unit structs, enums, name
/// collisions) produces a compile error.
///
/// Example:
/// ```ignore
/// use refl::Reflect;
///
/// #[derive(Reflect)]
/// struct Telemetry {
///     sensor_id: u32,
///     #[reflect(rename = "temp")]
///     temperature: f64,
///     #[reflect(skip)]
///     scratch: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_reflect(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_reflect(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;
    let type_name = name.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflect cannot be derived for generic types: registries are built per concrete type",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only structs with named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let catalogue = parse_container_attrs(input)?.unwrap_or_else(|| format_ident!("{}Field", name));

    let mut field_infos: Vec<FieldInfo> = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let attrs = parse_field_attrs(field)?;
        if attrs.skip {
            continue;
        }

        let field_name = attrs.rename.unwrap_or_else(|| ident.unraw().to_string());
        let variant = format_ident!("{}", to_camel_case(&ident.unraw().to_string()));

        if let Some(previous) = field_infos.iter().find(|f| f.name == field_name) {
            return Err(syn::Error::new_spanned(
                ident,
                format!(
                    "Field name \"{}\" is already registered by `{}`",
                    field_name, previous.ident
                ),
            ));
        }
        if let Some(previous) = field_infos.iter().find(|f| f.variant == variant) {
            return Err(syn::Error::new_spanned(
                ident,
                format!(
                    "Fields `{}` and `{}` map to the same catalogue alternative `{}`",
                    previous.ident, ident, variant
                ),
            ));
        }

        let mut ty = field.ty.clone();
        replace_self(&mut ty, name);

        field_infos.push(FieldInfo {
            ident: ident.clone(),
            ty,
            name: field_name,
            variant,
        });
    }

    let variants: Vec<_> = field_infos.iter().map(|f| &f.variant).collect();
    let types: Vec<_> = field_infos.iter().map(|f| &f.ty).collect();
    let names: Vec<_> = field_infos.iter().map(|f| f.name.as_str()).collect();
    let idents: Vec<_> = field_infos.iter().map(|f| &f.ident).collect();
    let indices: Vec<_> = (0..field_infos.len()).collect();

    let expanded = quote! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #vis enum #catalogue {
            #( #variants(::refl::TypeCarrier<#types>) ),*
        }

        impl ::refl::FieldTypeVariant for #catalogue {
            fn name(&self) -> &'static str {
                match *self {
                    #( Self::#variants(_) => #names ),*
                }
            }

            fn index(&self) -> usize {
                match *self {
                    #( Self::#variants(_) => #indices ),*
                }
            }

            fn accept<__V: ::refl::FieldTypeVisitor>(&self, visitor: &mut __V) -> __V::Output {
                match *self {
                    #( Self::#variants(carrier) => visitor.visit(#names, carrier) ),*
                }
            }
        }

        // SAFETY: offsets come from `offset_of!` on the fields listed below, and
        // the table, registry and `FieldAt` impls are generated from the same list.
        unsafe impl ::refl::Reflect for #name {
            type FieldType = #catalogue;

            const TYPE_NAME: &'static str =
                ::core::concat!(::core::module_path!(), "::", #type_name);

            const TYPE_TABLE: &'static [(&'static str, #catalogue)] = &[
                #( (#names, #catalogue::#variants(::refl::TypeCarrier::new())) ),*
            ];

            fn registry() -> &'static ::refl::Registry<Self> {
                static REGISTRY: ::std::sync::OnceLock<::refl::Registry<#name>> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    ::refl::Registry::new(::std::vec![
                        #( ::refl::refl_field!(#idents : #types => #names) ),*
                    ])
                })
            }
        }

        #(
            // SAFETY: see the `Reflect` impl above.
            unsafe impl ::refl::FieldAt<#indices> for #name {
                type Type = #types;
                const NAME: &'static str = #names;
                const OFFSET: usize = ::core::mem::offset_of!(#name, #idents);
            }
        )*
    };

    Ok(expanded)
}

/// Rewrites `Self` paths to the owner type.
///
/// Field types are emitted inside the catalogue enum too, where `Self` would
/// name the enum instead of the struct.
struct ReplaceSelf<'a> {
    owner: &'a Ident,
}

impl VisitMut for ReplaceSelf<'_> {
    fn visit_path_mut(&mut self, path: &mut Path) {
        if path.leading_colon.is_none() {
            if let Some(first) = path.segments.first_mut() {
                if first.ident == "Self" {
                    first.ident = self.owner.clone();
                }
            }
        }
        visit_mut::visit_path_mut(self, path);
    }
}

fn replace_self(ty: &mut Type, owner: &Ident) {
    ReplaceSelf { owner }.visit_type_mut(ty);
}

/// `#[reflect(catalogue = Name)]` on the struct.
fn parse_container_attrs(input: &DeriveInput) -> syn::Result<Option<Ident>> {
    let mut catalogue = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("catalogue") {
                catalogue = Some(meta.value()?.parse::<Ident>()?);
                Ok(())
            } else {
                Err(meta.error("Unsupported container attribute, expected `catalogue = Name`"))
            }
        })?;
    }
    Ok(catalogue)
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error(
                    "Unsupported field attribute, expected `skip` or `rename = \"name\"`",
                ))
            }
        })?;
    }
    Ok(attrs)
}

/// `sensor_id` -> `SensorId`
fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for segment in name.split('_').filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `#[derive(TypeShape)]`: structural shape for the fuzzy matcher
///
/// - non-generic types become an atom named `module::path::Type`;
/// - generic types become `Type<..>` applied to their type parameters (each gets a
///   `TypeShape` bound). Lifetimes are ignored.
///
/// Works on structs, enums and unions. Const generic parameters are rejected.
///
/// Example:
/// ```ignore
/// use refl::{DontCare, TypeShape};
///
/// #[derive(TypeShape)]
/// struct Envelope<T>(T);
///
/// refl::assert_fuzzy_match!(Envelope<Envelope<u8>>, Envelope<DontCare>);
/// ```
#[proc_macro_derive(TypeShape)]
pub fn derive_type_shape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_type_shape(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_type_shape(mut input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();

    let mut params = Vec::new();
    for param in &input.generics.params {
        match param {
            GenericParam::Type(ty) => params.push(ty.ident.clone()),
            GenericParam::Lifetime(_) => {}
            GenericParam::Const(c) => {
                return Err(syn::Error::new_spanned(
                    c,
                    "TypeShape cannot be derived for types with const generic parameters",
                ))
            }
        }
    }

    let where_clause = input.generics.make_where_clause();
    for param in &params {
        let predicate: WherePredicate = syn::parse_quote!(#param: ::refl::TypeShape);
        where_clause.predicates.push(predicate);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let shape = if params.is_empty() {
        quote! {
            ::refl::Shape::Atom(::core::concat!(::core::module_path!(), "::", #name_str))
        }
    } else {
        quote! {
            ::refl::Shape::Applied {
                head: ::core::concat!(::core::module_path!(), "::", #name_str),
                args: &[ #( <#params as ::refl::TypeShape>::SHAPE ),* ],
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::refl::TypeShape for #name #ty_generics #where_clause {
            const SHAPE: ::refl::Shape = #shape;
        }
    })
}
