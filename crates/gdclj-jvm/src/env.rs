use gdclj_core::descriptor::{ClassName, LONG, long_value_of_signature};
use gdclj_core::{ManagedRuntime, RuntimeFault};
use jni::JNIEnv;
use jni::objects::{GlobalRef, JClass, JMethodID, JObject, JStaticMethodID, JValue, JValueOwned};
use jni::signature::ReturnType;
use jni::sys::jvalue;

/// A class pinned by a global reference.
#[derive(Debug)]
pub struct JvmClass(GlobalRef);

impl JvmClass {
    fn as_class(&self) -> &JClass<'static> {
        <&JClass>::from(self.0.as_obj())
    }
}

/// A Java object pinned by a global reference; `None` is Java `null`.
#[derive(Debug)]
pub struct JvmObject(Option<GlobalRef>);

impl JvmObject {
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    fn as_obj<'a>(&'a self, null: &'a JObject<'static>) -> &'a JObject<'static> {
        match &self.0 {
            Some(global) => global.as_obj(),
            None => null,
        }
    }
}

fn fault(err: jni::errors::Error) -> RuntimeFault {
    RuntimeFault::new(err.to_string())
}

/// JNI-backed runtime handle for the thread that created the JVM.
///
/// Every value handed out is a global reference, so nothing depends on the
/// local reference frame of the attaching thread.
pub struct JvmRuntime {
    env: JNIEnv<'static>,
}

impl JvmRuntime {
    pub fn new(env: JNIEnv<'static>) -> Self {
        Self { env }
    }

    fn pin(&mut self, local: JObject<'static>) -> Result<JvmObject, RuntimeFault> {
        if local.is_null() {
            return Ok(JvmObject(None));
        }
        let global = self.env.new_global_ref(&local).map_err(fault)?;
        self.env.delete_local_ref(local).map_err(fault)?;
        Ok(JvmObject(Some(global)))
    }

    fn object_result(&mut self, value: JValueOwned<'static>) -> Result<JvmObject, RuntimeFault> {
        let local = value.l().map_err(fault)?;
        self.pin(local)
    }
}

fn raw_args(args: &[&JvmObject], null: &JObject<'static>) -> Vec<jvalue> {
    args.iter()
        .map(|arg| JValue::Object(arg.as_obj(null)).as_jni())
        .collect()
}

impl ManagedRuntime for JvmRuntime {
    type Class = JvmClass;
    type StaticMethod = JStaticMethodID;
    type Method = JMethodID;
    type Object = JvmObject;

    fn find_class(&mut self, name: &ClassName) -> Result<JvmClass, RuntimeFault> {
        let local = self.env.find_class(name.internal()).map_err(fault)?;
        let global = self.env.new_global_ref(&local).map_err(fault)?;
        self.env.delete_local_ref(local).map_err(fault)?;
        tracing::trace!(class = %name, "Class resolved");
        Ok(JvmClass(global))
    }

    fn static_method(
        &mut self,
        class: &JvmClass,
        name: &str,
        signature: &str,
    ) -> Result<JStaticMethodID, RuntimeFault> {
        self.env
            .get_static_method_id(class.as_class(), name, signature)
            .map_err(fault)
    }

    fn instance_method(
        &mut self,
        class: &JvmClass,
        name: &str,
        signature: &str,
    ) -> Result<JMethodID, RuntimeFault> {
        self.env
            .get_method_id(class.as_class(), name, signature)
            .map_err(fault)
    }

    fn new_string(&mut self, value: &str) -> Result<JvmObject, RuntimeFault> {
        let local = self.env.new_string(value).map_err(fault)?;
        self.pin(JObject::from(local))
    }

    fn box_long(&mut self, value: i64) -> Result<JvmObject, RuntimeFault> {
        let class = ClassName::new(LONG).internal();
        let boxed = self
            .env
            .call_static_method(
                class.as_str(),
                "valueOf",
                long_value_of_signature(),
                &[JValue::Long(value)],
            )
            .map_err(fault)?;
        self.object_result(boxed)
    }

    fn call_static(
        &mut self,
        class: &JvmClass,
        method: JStaticMethodID,
        args: &[&JvmObject],
    ) -> Result<JvmObject, RuntimeFault> {
        let null = JObject::null();
        let raw = raw_args(args, &null);
        // SAFETY: `method` was resolved on `class` with a signature whose
        // parameters are all object references and whose return type is an
        // object, matching `raw` and `ReturnType::Object`.
        let value = unsafe {
            self.env
                .call_static_method_unchecked(class.as_class(), method, ReturnType::Object, &raw)
        }
        .map_err(fault)?;
        self.object_result(value)
    }

    fn call_method(
        &mut self,
        target: &JvmObject,
        method: JMethodID,
        args: &[&JvmObject],
    ) -> Result<JvmObject, RuntimeFault> {
        if target.is_null() {
            return Err(RuntimeFault::new("invoke target is null"));
        }
        let null = JObject::null();
        let raw = raw_args(args, &null);
        // SAFETY: `method` is `IFn.invoke` for exactly `args.len()` object
        // parameters returning an object, and `target` is a non-null IFn.
        let value = unsafe {
            self.env
                .call_method_unchecked(target.as_obj(&null), method, ReturnType::Object, &raw)
        }
        .map_err(fault)?;
        self.object_result(value)
    }

    fn exception_pending(&mut self) -> bool {
        // A failing check means the env itself is unusable; treat it as pending.
        self.env.exception_check().unwrap_or(true)
    }

    fn describe_exception(&mut self) {
        if let Err(e) = self.env.exception_describe() {
            tracing::warn!(error = %e, "ExceptionDescribe failed");
        }
    }
}
