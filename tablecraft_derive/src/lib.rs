extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{
    Data, DeriveInput, Expr, ExprLit, ExprUnary, Field, Fields, Lit, LitInt, LitStr, Token, UnOp,
    parenthesized, parse_macro_input,
};

/// Implements `tablecraft::Entity` for a struct with named fields.
///
/// ```ignore
/// #[entity(table_name = "users")]
/// pub struct User {
///     #[id]
///     #[column(ty = "int")]
///     pub id: i64,
///     #[column(ty = "string", length = 100, unique)]
///     pub email: String,
///     #[column(ty = "bool", default = true)]
///     pub active: bool,
///     pub cached_score: f32, // no #[column]: not part of the table
/// }
/// ```
///
/// Leaving out `table_name` compiles, but describing the entity then fails
/// with `SchemaError::MissingTableMetadata`.
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(item as DeriveInput);

    // -------- table_name parsing --------
    let mut table_name: Option<LitStr> = None;
    if !attr.is_empty() {
        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("table_name") {
                table_name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported entity property, expected `table_name`"))
            }
        });
        parse_macro_input!(attr with parser);
    }

    match expand(&mut input, table_name) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &mut DeriveInput, table_name: Option<LitStr>) -> syn::Result<TokenStream2> {
    let fields = match &mut input.data {
        Data::Struct(s) => match &mut s.fields {
            Fields::Named(named) => &mut named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[entity] needs a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[entity] can only be used on structs",
            ));
        }
    };

    // -------- fields --------
    let mut cols = Vec::new();
    for field in fields.iter_mut() {
        if let Some(column) = ColumnAttr::from_field(field)? {
            cols.push(column.declaration());
        }
        field
            .attrs
            .retain(|a| !a.path().is_ident("column") && !a.path().is_ident("id"));
    }

    // -------- generate output --------
    let ident = &input.ident;
    let entity_name = ident.to_string();
    let table = table_name.map(|t| quote!(.table_name(#t)));
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics ::tablecraft::Entity for #ident #ty_generics #where_clause {
            fn declaration() -> ::tablecraft::EntityDeclaration {
                ::tablecraft::EntityDeclaration::new(#entity_name)
                    #table
                    #(.column(#cols))*
            }
        }
    })
}

/// Everything collected from a field's `#[column(...)]` and `#[id]`.
struct ColumnAttr {
    field: String,
    ty: Option<LitStr>,
    name: Option<LitStr>,
    length: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
    options: Vec<LitStr>,
    identity: bool,
    unique: bool,
    nullable: Option<bool>,
    default: Option<TokenStream2>,
    generated: Option<LitStr>,
}

impl ColumnAttr {
    fn from_field(field: &Field) -> syn::Result<Option<Self>> {
        let Some(ident) = field.ident.as_ref() else {
            return Ok(None);
        };

        let mut column = ColumnAttr {
            field: ident.unraw().to_string(),
            ty: None,
            name: None,
            length: None,
            precision: None,
            scale: None,
            options: Vec::new(),
            identity: false,
            unique: false,
            nullable: None,
            default: None,
            generated: None,
        };
        let mut annotated = false;

        for attr in &field.attrs {
            if attr.path().is_ident("id") {
                attr.meta.require_path_only()?;
                column.identity = true;
                annotated = true;
            } else if attr.path().is_ident("column") {
                attr.parse_nested_meta(|meta| column.parse_property(meta))?;
                annotated = true;
            }
        }

        if !annotated {
            return Ok(None);
        }
        if column.ty.is_none() {
            return Err(syn::Error::new_spanned(
                ident,
                "column is missing its type, add `#[column(ty = \"...\")]`",
            ));
        }
        Ok(Some(column))
    }

    fn parse_property(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let path = &meta.path;
        if path.is_ident("ty") {
            self.ty = Some(meta.value()?.parse()?);
        } else if path.is_ident("name") {
            let name: LitStr = meta.value()?.parse()?;
            if name.value().is_empty() {
                return Err(syn::Error::new_spanned(name, "column name cannot be empty"));
            }
            self.name = Some(name);
        } else if path.is_ident("length") {
            self.length = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
        } else if path.is_ident("precision") {
            self.precision = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
        } else if path.is_ident("scale") {
            self.scale = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
        } else if path.is_ident("options") {
            let content;
            parenthesized!(content in meta.input);
            self.options = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?
                .into_iter()
                .collect();
        } else if path.is_ident("identity") {
            self.identity = true;
        } else if path.is_ident("unique") {
            self.unique = true;
        } else if path.is_ident("nullable") {
            self.nullable = Some(true);
        } else if path.is_ident("not_null") {
            self.nullable = Some(false);
        } else if path.is_ident("default") {
            let expr: Expr = meta.value()?.parse()?;
            self.default = Some(default_value(&expr)?);
        } else if path.is_ident("generated") {
            self.generated = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unsupported column property"));
        }
        Ok(())
    }

    /// Builder chain producing a `tablecraft::ColumnDeclaration`.
    fn declaration(&self) -> TokenStream2 {
        let field = &self.field;
        let ty = &self.ty;
        let mut decl = quote!(::tablecraft::ColumnDeclaration::new(#field, #ty));

        if let Some(name) = &self.name {
            decl = quote!(#decl.name(#name));
        }
        if let Some(length) = self.length {
            decl = quote!(#decl.length(#length));
        }
        if let Some(precision) = self.precision {
            decl = quote!(#decl.precision(#precision));
        }
        if let Some(scale) = self.scale {
            decl = quote!(#decl.scale(#scale));
        }
        if !self.options.is_empty() {
            let options = &self.options;
            decl = quote!(#decl.options([#(#options),*]));
        }
        if self.identity {
            decl = quote!(#decl.identity());
        }
        if self.unique {
            decl = quote!(#decl.unique());
        }
        match self.nullable {
            Some(true) => decl = quote!(#decl.nullable()),
            Some(false) => decl = quote!(#decl.not_null()),
            None => {}
        }
        if let Some(default) = &self.default {
            decl = quote!(#decl.default_value(#default));
        }
        if let Some(generated) = &self.generated {
            decl = quote!(#decl.generated(#generated));
        }
        decl
    }
}

fn default_value(expr: &Expr) -> syn::Result<TokenStream2> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => literal_default(lit, false),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match &**inner {
            Expr::Lit(ExprLit { lit, .. }) => literal_default(lit, true),
            other => Err(unsupported_default(other)),
        },
        other => Err(unsupported_default(other)),
    }
}

fn literal_default(lit: &Lit, negative: bool) -> syn::Result<TokenStream2> {
    match lit {
        Lit::Str(s) if !negative => Ok(quote!(
            ::tablecraft::DefaultValue::String(::std::string::String::from(#s))
        )),
        Lit::Bool(b) if !negative => Ok(quote!(::tablecraft::DefaultValue::Bool(#b))),
        Lit::Int(i) => {
            let value: i64 = i.base10_parse()?;
            let sign = negative.then(|| quote!(-));
            Ok(quote!(::tablecraft::DefaultValue::Integer(#sign #value)))
        }
        Lit::Float(f) => {
            let value: f64 = f.base10_parse()?;
            if !value.is_finite() {
                return Err(syn::Error::new_spanned(
                    f,
                    "default float is out of range for f64",
                ));
            }
            let sign = negative.then(|| quote!(-));
            Ok(quote!(::tablecraft::DefaultValue::Float(#sign #value)))
        }
        other => Err(syn::Error::new_spanned(
            other,
            "default must be a string, integer, float or bool literal",
        )),
    }
}

fn unsupported_default(expr: &Expr) -> syn::Error {
    syn::Error::new_spanned(
        expr,
        "default must be a string, integer, float or bool literal",
    )
}
