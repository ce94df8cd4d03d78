use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, parse_macro_input};

/// Compiles a function for the SIMD targets ditherworks cares about and
/// dispatches to the best one at runtime.
///
/// This macro expands to `#[multiversion::multiversion(targets(...))]`, so the
/// calling crate needs `multiversion` as a dependency. Plain scalar loops
/// benefit as well since each clone is auto-vectorized for its target.
///
/// # Example
///
/// ```ignore
/// use ditherworks_macros::simd_targets;
///
/// #[simd_targets]
/// pub fn squared_norm(v: &[f32]) -> f32 {
///     v.iter().map(|x| x * x).sum()
/// }
/// ```
#[proc_macro_attribute]
pub fn simd_targets(_attr: TokenStream, input: TokenStream) -> TokenStream {
    let func = parse_macro_input!(input as ItemFn);

    // Use minimal targets for debug builds to speed up compilation
    #[cfg(debug_assertions)]
    let expanded = quote! {
        #[multiversion::multiversion(targets(
            "x86_64+sse2",
            "aarch64+neon",
        ))]
        #func
    };

    #[cfg(not(debug_assertions))]
    let expanded = quote! {
        #[multiversion::multiversion(targets(
            "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
            "x86_64+avx2+fma",
            "x86_64+sse4.2",
            "x86_64+sse2",
            "aarch64+neon",
        ))]
        #func
    };

    TokenStream::from(expanded)
}
