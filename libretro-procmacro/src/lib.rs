extern crate proc_macro;
use proc_macro::TokenStream;

/// Exports the libretro C API for the core implemented by the annotated
/// `impl LibretroCore for ...` block.
#[proc_macro_attribute]
pub fn libretro_core(_attr: TokenStream, tokens: TokenStream) -> TokenStream {
    let trait_impl: syn::ItemImpl = syn::parse_macro_input!(tokens);

    // Validate the trait is implemented
    match &trait_impl.trait_ {
        Some((_, path, _)) => {
            let implements_core = path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "LibretroCore");
            if !implements_core {
                return syn::Error::new_spanned(path, "the impl block should implement LibretroCore")
                    .to_compile_error()
                    .into();
            }
        }
        None => {
            return syn::Error::new_spanned(&trait_impl.self_ty, "not a trait implementation")
                .to_compile_error()
                .into();
        }
    }

    // Get the type identifier
    let core_ty = match &*trait_impl.self_ty {
        syn::Type::Path(syn::TypePath { qself: None, path }) => path.clone(),
        other => {
            return syn::Error::new_spanned(other, "LibretroCore must be implemented on a named type")
                .to_compile_error()
                .into();
        }
    };

    let expanded = quote::quote! {
        #trait_impl

        static __LIBRETRO_CONTEXT: ::libretro_plugin::ffi::ContextSlot<#core_ty> =
            ::libretro_plugin::ffi::slot::<#core_ty>();

        #[no_mangle]
        pub extern "C" fn retro_api_version() -> ::std::ffi::c_uint {
            ::libretro_plugin::ffi::api_version(&__LIBRETRO_CONTEXT)
        }

        #[no_mangle]
        pub extern "C" fn retro_set_environment(
            cb: ::core::option::Option<::libretro_plugin::sys::retro_environment_t>,
        ) {
            ::libretro_plugin::ffi::set_environment(&__LIBRETRO_CONTEXT, cb)
        }

        #[no_mangle]
        pub extern "C" fn retro_set_video_refresh(
            cb: ::core::option::Option<::libretro_plugin::sys::retro_video_refresh_t>,
        ) {
            ::libretro_plugin::ffi::set_video_refresh(&__LIBRETRO_CONTEXT, cb)
        }

        #[no_mangle]
        pub extern "C" fn retro_set_audio_sample(
            _cb: ::core::option::Option<::libretro_plugin::sys::retro_audio_sample_t>,
        ) {
        }

        #[no_mangle]
        pub extern "C" fn retro_set_audio_sample_batch(
            _cb: ::core::option::Option<::libretro_plugin::sys::retro_audio_sample_batch_t>,
        ) {
        }

        #[no_mangle]
        pub extern "C" fn retro_set_input_poll(
            cb: ::core::option::Option<::libretro_plugin::sys::retro_input_poll_t>,
        ) {
            ::libretro_plugin::ffi::set_input_poll(&__LIBRETRO_CONTEXT, cb)
        }

        #[no_mangle]
        pub extern "C" fn retro_set_input_state(
            cb: ::core::option::Option<::libretro_plugin::sys::retro_input_state_t>,
        ) {
            ::libretro_plugin::ffi::set_input_state(&__LIBRETRO_CONTEXT, cb)
        }

        #[no_mangle]
        pub extern "C" fn retro_init() {
            ::libretro_plugin::ffi::init(&__LIBRETRO_CONTEXT)
        }

        #[no_mangle]
        pub extern "C" fn retro_deinit() {
            ::libretro_plugin::ffi::deinit(&__LIBRETRO_CONTEXT)
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_get_system_info(
            info: *mut ::libretro_plugin::sys::retro_system_info,
        ) {
            ::libretro_plugin::ffi::get_system_info(&__LIBRETRO_CONTEXT, info)
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_get_system_av_info(
            info: *mut ::libretro_plugin::sys::retro_system_av_info,
        ) {
            ::libretro_plugin::ffi::get_system_av_info(&__LIBRETRO_CONTEXT, info)
        }

        #[no_mangle]
        pub extern "C" fn retro_set_controller_port_device(
            port: ::std::ffi::c_uint,
            device: ::std::ffi::c_uint,
        ) {
            ::libretro_plugin::ffi::set_controller_port_device(&__LIBRETRO_CONTEXT, port, device)
        }

        #[no_mangle]
        pub extern "C" fn retro_reset() {
            ::libretro_plugin::ffi::reset(&__LIBRETRO_CONTEXT)
        }

        #[no_mangle]
        pub extern "C" fn retro_run() {
            ::libretro_plugin::ffi::run(&__LIBRETRO_CONTEXT)
        }

        #[no_mangle]
        pub extern "C" fn retro_serialize_size() -> usize {
            ::libretro_plugin::ffi::serialize_size(&__LIBRETRO_CONTEXT)
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_serialize(data: *mut ::std::ffi::c_void, size: usize) -> bool {
            ::libretro_plugin::ffi::serialize(&__LIBRETRO_CONTEXT, data, size)
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_unserialize(
            data: *const ::std::ffi::c_void,
            size: usize,
        ) -> bool {
            ::libretro_plugin::ffi::unserialize(&__LIBRETRO_CONTEXT, data, size)
        }

        #[no_mangle]
        pub extern "C" fn retro_cheat_reset() {
            ::libretro_plugin::ffi::cheat_reset(&__LIBRETRO_CONTEXT)
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_cheat_set(
            index: ::std::ffi::c_uint,
            enabled: bool,
            code: *const ::std::ffi::c_char,
        ) {
            ::libretro_plugin::ffi::cheat_set(&__LIBRETRO_CONTEXT, index, enabled, code)
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_load_game(
            game: *const ::libretro_plugin::sys::retro_game_info,
        ) -> bool {
            ::libretro_plugin::ffi::load_game(&__LIBRETRO_CONTEXT, game)
        }

        #[no_mangle]
        pub unsafe extern "C" fn retro_load_game_special(
            game_type: ::std::ffi::c_uint,
            info: *const ::libretro_plugin::sys::retro_game_info,
            num_info: usize,
        ) -> bool {
            ::libretro_plugin::ffi::load_game_special(&__LIBRETRO_CONTEXT, game_type, info, num_info)
        }

        #[no_mangle]
        pub extern "C" fn retro_unload_game() {
            ::libretro_plugin::ffi::unload_game(&__LIBRETRO_CONTEXT)
        }

        #[no_mangle]
        pub extern "C" fn retro_get_region() -> ::std::ffi::c_uint {
            ::libretro_plugin::ffi::get_region(&__LIBRETRO_CONTEXT)
        }

        #[no_mangle]
        pub extern "C" fn retro_get_memory_data(id: ::std::ffi::c_uint) -> *mut ::std::ffi::c_void {
            ::libretro_plugin::ffi::get_memory_data(&__LIBRETRO_CONTEXT, id)
        }

        #[no_mangle]
        pub extern "C" fn retro_get_memory_size(id: ::std::ffi::c_uint) -> usize {
            ::libretro_plugin::ffi::get_memory_size(&__LIBRETRO_CONTEXT, id)
        }
    };

    TokenStream::from(expanded)
}
