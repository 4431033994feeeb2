//! Bridge between the exported C symbols and a [`LibretroCore`].
//!
//! `#[libretro_core]` declares one [`ContextSlot`] static per core and makes
//! each `retro_*` export call the function of the same name here. The
//! frontend drives a core from a single thread without re-entering it, so
//! the slot's mutex is never contended.

use std::ffi::{c_char, c_uint, c_void, CStr, CString};
use std::path::PathBuf;
use std::ptr;

use parking_lot::Mutex;
use tracing::Level;

use crate::{
    sys, Environment, GameInfo, Host, InputSource, JoypadButton, LibretroCore, LogSink,
    PixelFormat, SystemInfo, VideoSink,
};

/// All process-wide state of a core.
#[derive(Debug)]
pub struct Context<C> {
    pub host: Host,
    pub core: C,
    input: FfiInput,
    system_strings: Option<SystemInfoStrings>,
}

impl<C: LibretroCore> Context<C> {
    pub fn new(host: Host) -> Self {
        Self {
            host,
            core: C::default(),
            input: FfiInput::default(),
            system_strings: None,
        }
    }
}

impl<C: LibretroCore> Default for Context<C> {
    fn default() -> Self {
        Self::new(Host::default())
    }
}

pub type ContextSlot<C> = Mutex<Option<Context<C>>>;

pub const fn slot<C>() -> ContextSlot<C> {
    parking_lot::const_mutex(None)
}

/// Runs `f` on the context, creating it on first use.
pub fn with_context<C: LibretroCore, R>(
    slot: &ContextSlot<C>,
    f: impl FnOnce(&mut Context<C>) -> R,
) -> R {
    let mut guard = slot.lock();
    f(guard.get_or_insert_with(Context::default))
}

/// Keeps the strings handed out by `retro_get_system_info` alive.
#[derive(Debug)]
struct SystemInfoStrings {
    library_name: CString,
    library_version: CString,
    valid_extensions: CString,
}

impl SystemInfoStrings {
    fn new(info: &SystemInfo) -> Self {
        Self {
            library_name: c_string(&info.library_name),
            library_version: c_string(&info.library_version),
            valid_extensions: c_string(&info.extensions_joined()),
        }
    }
}

fn c_string(text: &str) -> CString {
    CString::new(text.replace('\0', "")).unwrap_or_default()
}

struct FfiVideo(sys::retro_video_refresh_t);

impl VideoSink for FfiVideo {
    fn refresh(&mut self, frame: &[u8], width: u32, height: u32, pitch: usize) {
        // SAFETY: the frontend only reads `height * pitch` bytes, which `frame`
        // holds, and does not keep the pointer past the call.
        unsafe { (self.0)(frame.as_ptr().cast(), width, height, pitch) }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct FfiInput {
    poll: Option<sys::retro_input_poll_t>,
    state: Option<sys::retro_input_state_t>,
}

impl InputSource for FfiInput {
    fn poll(&mut self) {
        if let Some(poll) = self.poll {
            // SAFETY: registered by the frontend through retro_set_input_poll.
            unsafe { poll() }
        }
    }

    fn pressed(&mut self, port: u32, button: JoypadButton) -> bool {
        match self.state {
            // SAFETY: registered by the frontend through retro_set_input_state.
            Some(state) => unsafe { state(port, sys::RETRO_DEVICE_JOYPAD, 0, button.id()) != 0 },
            None => false,
        }
    }
}

struct FfiEnvironment(sys::retro_environment_t);

impl FfiEnvironment {
    fn call<T>(&mut self, cmd: c_uint, data: &mut T) -> bool {
        // SAFETY: `data` has the layout the frontend expects for `cmd`.
        unsafe { (self.0)(cmd, (data as *mut T).cast()) }
    }
}

impl Environment for FfiEnvironment {
    fn set_pixel_format(&mut self, format: PixelFormat) -> bool {
        let mut raw = format.as_raw();
        self.call(sys::RETRO_ENVIRONMENT_SET_PIXEL_FORMAT, &mut raw)
    }

    fn set_support_no_game(&mut self, supported: bool) -> bool {
        let mut flag = supported;
        self.call(sys::RETRO_ENVIRONMENT_SET_SUPPORT_NO_GAME, &mut flag)
    }

    fn log_interface(&mut self) -> Option<Box<dyn LogSink>> {
        let mut callback = sys::retro_log_callback { log: None };
        if !self.call(sys::RETRO_ENVIRONMENT_GET_LOG_INTERFACE, &mut callback) {
            return None;
        }
        callback
            .log
            .map(|log| Box::new(FfiLog(log)) as Box<dyn LogSink>)
    }

    fn shutdown(&mut self) -> bool {
        // SAFETY: SHUTDOWN takes no payload.
        unsafe { (self.0)(sys::RETRO_ENVIRONMENT_SHUTDOWN, ptr::null_mut()) }
    }
}

struct FfiLog(sys::retro_log_printf_t);

impl LogSink for FfiLog {
    fn log(&mut self, level: Level, message: &str) {
        let message = c_string(message);
        // SAFETY: a "%s" format consumes exactly the one string argument.
        unsafe { (self.0)(raw_log_level(level), c"%s\n".as_ptr(), message.as_ptr()) }
    }
}

pub fn raw_log_level(level: Level) -> c_uint {
    if level == Level::ERROR {
        sys::RETRO_LOG_ERROR
    } else if level == Level::WARN {
        sys::RETRO_LOG_WARN
    } else if level == Level::INFO {
        sys::RETRO_LOG_INFO
    } else {
        sys::RETRO_LOG_DEBUG
    }
}

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn opt_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

#[cfg(unix)]
fn path_from_c(path: &CStr) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(path.to_bytes()))
}

#[cfg(not(unix))]
fn path_from_c(path: &CStr) -> PathBuf {
    PathBuf::from(path.to_string_lossy().into_owned())
}

/// # Safety
/// Pointers inside `raw` must be null or valid per the libretro contract.
unsafe fn game_info<'a>(raw: &sys::retro_game_info) -> GameInfo<'a> {
    let path = (!raw.path.is_null()).then(|| path_from_c(CStr::from_ptr(raw.path)));
    let data = (!raw.data.is_null() && raw.size > 0)
        .then(|| std::slice::from_raw_parts(raw.data.cast::<u8>(), raw.size));

    GameInfo {
        path,
        data,
        meta: opt_str(raw.meta).map(str::to_string),
    }
}

pub fn api_version<C: LibretroCore>(slot: &ContextSlot<C>) -> c_uint {
    with_context(slot, |ctx| {
        ctx.host
            .log
            .debug(format_args!("API version: {}", sys::RETRO_API_VERSION));
    });
    sys::RETRO_API_VERSION
}

pub fn set_environment<C: LibretroCore>(
    slot: &ContextSlot<C>,
    callback: Option<sys::retro_environment_t>,
) {
    with_context(slot, |ctx| {
        ctx.host.environment =
            callback.map(|cb| Box::new(FfiEnvironment(cb)) as Box<dyn Environment>);
        ctx.core.environment_changed(&mut ctx.host);
    })
}

pub fn set_video_refresh<C: LibretroCore>(
    slot: &ContextSlot<C>,
    callback: Option<sys::retro_video_refresh_t>,
) {
    with_context(slot, |ctx| match callback {
        Some(cb) => {
            ctx.host.video = Some(Box::new(FfiVideo(cb)));
            ctx.host.log.debug("Video refresh callback set");
        }
        None => {
            ctx.host.video = None;
            ctx.host.log.warn("Null video refresh callback");
        }
    })
}

pub fn set_input_poll<C: LibretroCore>(
    slot: &ContextSlot<C>,
    callback: Option<sys::retro_input_poll_t>,
) {
    with_context(slot, |ctx| {
        ctx.input.poll = callback;
        ctx.host.input = Some(Box::new(ctx.input));
        match callback {
            Some(_) => ctx.host.log.debug("Input poll callback set"),
            None => ctx.host.log.warn("Null input poll callback"),
        }
    })
}

pub fn set_input_state<C: LibretroCore>(
    slot: &ContextSlot<C>,
    callback: Option<sys::retro_input_state_t>,
) {
    with_context(slot, |ctx| {
        ctx.input.state = callback;
        ctx.host.input = Some(Box::new(ctx.input));
        match callback {
            Some(_) => ctx.host.log.debug("Input state callback set"),
            None => ctx.host.log.warn("Null input state callback"),
        }
    })
}

pub fn init<C: LibretroCore>(slot: &ContextSlot<C>) {
    with_context(slot, |ctx| ctx.core.init(&mut ctx.host))
}

pub fn deinit<C: LibretroCore>(slot: &ContextSlot<C>) {
    with_context(slot, |ctx| ctx.core.deinit(&mut ctx.host))
}

pub fn reset<C: LibretroCore>(slot: &ContextSlot<C>) {
    with_context(slot, |ctx| ctx.core.reset(&mut ctx.host))
}

pub fn run<C: LibretroCore>(slot: &ContextSlot<C>) {
    with_context(slot, |ctx| ctx.core.run(&mut ctx.host))
}

/// # Safety
/// `info` must be null or valid for writes.
pub unsafe fn get_system_info<C: LibretroCore>(
    slot: &ContextSlot<C>,
    info: *mut sys::retro_system_info,
) {
    if info.is_null() {
        return;
    }

    with_context(slot, |ctx| {
        let system = C::system_info();
        log_descriptor(&mut ctx.host, "System info", &system);

        let strings = ctx
            .system_strings
            .get_or_insert_with(|| SystemInfoStrings::new(&system));
        info.write(sys::retro_system_info {
            library_name: strings.library_name.as_ptr(),
            library_version: strings.library_version.as_ptr(),
            valid_extensions: strings.valid_extensions.as_ptr(),
            need_fullpath: system.need_fullpath,
            block_extract: system.block_extract,
        });
    })
}

/// # Safety
/// `info` must be null or valid for writes.
pub unsafe fn get_system_av_info<C: LibretroCore>(
    slot: &ContextSlot<C>,
    info: *mut sys::retro_system_av_info,
) {
    if info.is_null() {
        return;
    }

    with_context(slot, |ctx| {
        let av = C::av_info();
        log_descriptor(&mut ctx.host, "AV info", &av);
        info.write(av.to_raw());
    })
}

fn log_descriptor(host: &mut Host, name: &str, descriptor: &impl serde::Serialize) {
    match serde_json::to_string(descriptor) {
        Ok(json) => host.log.debug(format_args!("{name}: {json}")),
        Err(err) => host.log.warn(format_args!("{name}: unprintable ({err})")),
    }
}

pub fn set_controller_port_device<C: LibretroCore>(
    slot: &ContextSlot<C>,
    port: c_uint,
    device: c_uint,
) {
    with_context(slot, |ctx| {
        ctx.core
            .set_controller_port_device(&mut ctx.host, port, device)
    })
}

/// # Safety
/// `game` must be null or point to a valid `retro_game_info`.
pub unsafe fn load_game<C: LibretroCore>(
    slot: &ContextSlot<C>,
    game: *const sys::retro_game_info,
) -> bool {
    let game = game.as_ref().map(|raw| game_info(raw));
    with_context(slot, |ctx| ctx.core.load_game(&mut ctx.host, game.as_ref()))
}

/// # Safety
/// `info` must be null or point to `num_info` valid `retro_game_info`s.
pub unsafe fn load_game_special<C: LibretroCore>(
    slot: &ContextSlot<C>,
    game_type: c_uint,
    info: *const sys::retro_game_info,
    num_info: usize,
) -> bool {
    let games: Vec<GameInfo> = if info.is_null() {
        Vec::new()
    } else {
        std::slice::from_raw_parts(info, num_info)
            .iter()
            .map(|raw| game_info(raw))
            .collect()
    };
    with_context(slot, |ctx| {
        ctx.core.load_game_special(&mut ctx.host, game_type, &games)
    })
}

pub fn unload_game<C: LibretroCore>(slot: &ContextSlot<C>) {
    with_context(slot, |ctx| ctx.core.unload_game(&mut ctx.host))
}

pub fn get_region<C: LibretroCore>(slot: &ContextSlot<C>) -> c_uint {
    with_context(slot, |ctx| ctx.core.region(&mut ctx.host).as_raw())
}

pub fn serialize_size<C: LibretroCore>(slot: &ContextSlot<C>) -> usize {
    with_context(slot, |ctx| ctx.core.serialize_size(&mut ctx.host))
}

/// # Safety
/// `data` must be null or valid for `size` bytes of writes.
pub unsafe fn serialize<C: LibretroCore>(
    slot: &ContextSlot<C>,
    data: *mut c_void,
    size: usize,
) -> bool {
    let buffer: &mut [u8] = if data.is_null() {
        Default::default()
    } else {
        std::slice::from_raw_parts_mut(data.cast(), size)
    };
    with_context(slot, |ctx| ctx.core.serialize(&mut ctx.host, buffer))
}

/// # Safety
/// `data` must be null or valid for `size` bytes of reads.
pub unsafe fn unserialize<C: LibretroCore>(
    slot: &ContextSlot<C>,
    data: *const c_void,
    size: usize,
) -> bool {
    let data: &[u8] = if data.is_null() {
        Default::default()
    } else {
        std::slice::from_raw_parts(data.cast(), size)
    };
    with_context(slot, |ctx| ctx.core.unserialize(&mut ctx.host, data))
}

pub fn cheat_reset<C: LibretroCore>(slot: &ContextSlot<C>) {
    with_context(slot, |ctx| ctx.core.cheat_reset(&mut ctx.host))
}

/// # Safety
/// `code` must be null or point to a NUL-terminated string.
pub unsafe fn cheat_set<C: LibretroCore>(
    slot: &ContextSlot<C>,
    index: c_uint,
    enabled: bool,
    code: *const c_char,
) {
    let code = opt_str(code);
    with_context(slot, |ctx| {
        ctx.core.cheat_set(&mut ctx.host, index, enabled, code)
    })
}

pub fn get_memory_data<C: LibretroCore>(slot: &ContextSlot<C>, id: c_uint) -> *mut c_void {
    with_context(slot, |ctx| {
        ctx.core
            .memory_data(&mut ctx.host, id)
            .map_or(ptr::null_mut(), |memory| memory.as_mut_ptr().cast())
    })
}

pub fn get_memory_size<C: LibretroCore>(slot: &ContextSlot<C>, id: c_uint) -> usize {
    with_context(slot, |ctx| ctx.core.memory_size(&mut ctx.host, id))
}
