use glam::{Mat4, Quat, Vec3, Vec4};
use super::*;

#[test]
fn test_identity_pose_flips_y_and_z() {
    let modelview = modelview_from_pose(&Mat4::IDENTITY);
    assert_eq!(modelview, CAMERA_TO_EYE);

    // A point in front of the camera ends up in front of the GL eye (−z)
    let eye = modelview * Vec4::new(0.0, 0.0, 2.0, 1.0);
    assert!((eye.z + 2.0).abs() < 1e-6);

    // Image-down is GL-down
    let eye = modelview * Vec4::new(0.0, 1.0, 0.0, 1.0);
    assert!((eye.y + 1.0).abs() < 1e-6);
}

#[test]
fn test_camera_position_maps_to_eye_origin() {
    let pose = Mat4::from_rotation_translation(
        Quat::from_rotation_y(0.7) * Quat::from_rotation_x(-0.3),
        Vec3::new(1.0, -2.0, 3.5),
    );
    let modelview = modelview_from_pose(&pose);

    let eye = modelview * pose_position(&pose).extend(1.0);
    assert!(eye.truncate().length() < 1e-5);
}

#[test]
fn test_point_along_optical_axis_is_in_front() {
    let pose = Mat4::from_rotation_translation(Quat::from_rotation_z(1.2), Vec3::new(0.0, 5.0, 0.0));
    let forward = pose.transform_vector3(Vec3::Z);
    let target = pose_position(&pose) + forward * 4.0;

    let eye = modelview_from_pose(&pose) * target.extend(1.0);
    assert!(eye.x.abs() < 1e-5);
    assert!(eye.y.abs() < 1e-5);
    assert!((eye.z + 4.0).abs() < 1e-5);
}

#[test]
fn test_pose_position() {
    let pose = Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(pose_position(&pose), Vec3::new(4.0, 5.0, 6.0));
}
