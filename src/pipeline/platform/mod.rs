//! Platform-native builders.
//!
//! One [`NativeBuilder`] implementation per target platform:
//!
//! - **Android**: Gradle `assembleDebug`/`assembleRelease`, output copied
//!   from `android/app/build/outputs`
//! - **iOS**: `xcrun xcodebuild`, derived data written straight into the
//!   packaged output directory

pub mod android;
pub mod ios;

use super::TargetPlatform;
use super::stage::NativeBuilder;

pub use android::AndroidBuilder;
pub use ios::IosBuilder;

/// Returns the builder for the given target.
pub fn native_builder_for(target: TargetPlatform) -> Box<dyn NativeBuilder> {
    match target {
        TargetPlatform::Android => Box::new(AndroidBuilder),
        TargetPlatform::Ios => Box::new(IosBuilder),
    }
}
