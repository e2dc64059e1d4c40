/// Handles, descriptors and fixed-function state values of the GPU driver interface

use glam::{Mat4, Vec3, Vec4};

// ===== HANDLES =====

macro_rules! gpu_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub u32);

        impl $name {
            /// The null handle (no object)
            pub const NULL: Self = Self(0);

            /// Returns true for the null handle
            pub fn is_null(self) -> bool {
                self.0 == 0
            }

            /// Raw driver name of the object
            pub fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

gpu_handle!(
    /// Linked shader program
    ProgramHandle
);
gpu_handle!(
    /// Vertex or element buffer
    BufferHandle
);
gpu_handle!(
    /// Vertex array object (attribute bindings)
    VertexArrayHandle
);
gpu_handle!(
    /// 2D or 3D texture
    TextureHandle
);
gpu_handle!(
    /// Depth renderbuffer
    RenderbufferHandle
);
gpu_handle!(
    /// Framebuffer object. The window's framebuffer has no handle.
    FramebufferHandle
);

/// Location of a uniform inside a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation {
    pub program: ProgramHandle,
    pub index: i32,
}

/// Value uploaded to a uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

// ===== BUFFERS & VERTEX INPUT =====

/// Buffer binding point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data
    Array,
    /// Triangle indices
    ElementArray,
}

/// Component type of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttribType {
    F32,
}

/// Layout of one vertex attribute slot, read from the currently bound array buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttrib {
    /// Components per vertex (1..=4)
    pub components: u8,
    pub kind: AttribType,
    pub normalized: bool,
    /// Byte stride between vertices, 0 for tightly packed
    pub stride: u32,
    /// Byte offset of the first component
    pub offset: u32,
}

impl VertexAttrib {
    /// Tightly packed 3 x f32 attribute (positions, normals)
    pub fn vec3_f32() -> Self {
        Self {
            components: 3,
            kind: AttribType::F32,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }
}

/// Primitive assembly mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    Triangles,
    TriangleStrip,
    Lines,
}

/// Index element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    U16,
    U32,
}

// ===== TEXTURES =====

/// Texture binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    Texture2D,
    Texture3D,
}

/// Minification/magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

impl FilterMode {
    /// Map the integer filter selector used by render target callers:
    /// 0 selects nearest, anything else linear
    pub fn from_method(method: i32) -> Self {
        if method == 0 {
            FilterMode::Nearest
        } else {
            FilterMode::Linear
        }
    }
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

/// Internal storage format of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 4 x 32-bit float
    Rgba32Float,
    /// 4 x 8-bit normalized
    Rgba8,
}

/// Client-side pixel layout used when (re)specifying texture storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelTransfer {
    /// RGBA, unsigned bytes
    Rgba8,
}

/// Descriptor for creating a texture
///
/// `depth` is ignored for 2D textures.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDesc {
    pub target: TextureTarget,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub format: TextureFormat,
    pub transfer: PixelTransfer,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub wrap: WrapMode,
}

/// Queried state of an existing texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParameters {
    pub target: TextureTarget,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub format: TextureFormat,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub wrap_r: WrapMode,
}

// ===== FRAMEBUFFERS =====

/// Depth renderbuffer storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFormat {
    Depth24,
}

/// Result of a framebuffer completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    /// An attachment refers to a deleted or zero-sized object
    IncompleteAttachment,
    /// No color attachment
    MissingAttachment,
    /// Attachments disagree on their extent
    IncompleteDimensions,
    /// No framebuffer object bound
    Undefined,
}

impl FramebufferStatus {
    pub fn is_complete(self) -> bool {
        self == FramebufferStatus::Complete
    }
}

// ===== FIXED-FUNCTION STATE =====

/// Viewport rectangle in framebuffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering `width x height` from the origin
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width over height, `None` for a degenerate viewport
    pub fn aspect(&self) -> Option<f32> {
        if self.width > 0 && self.height > 0 {
            Some(self.width as f32 / self.height as f32)
        } else {
            None
        }
    }
}

/// Toggleable pipeline capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    DepthTest,
    CullFace,
    Blend,
}

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    Less,
    LessEqual,
    Always,
}

/// Blend factor for source or destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

bitflags::bitflags! {
    /// Buffers cleared by `GraphicsDevice::clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}
