use criterion::{Criterion, criterion_group, criterion_main};
use modlog::{
    Logger, ModuleHandle, NativePath, OsImpl, Platform, Record, Result, Timestamp, format_record,
};
use std::{hint::black_box, path::PathBuf};

/// Logs next to a scratch "module" under the target directory.
struct BenchModule(PathBuf);

impl Platform for BenchModule {
    type Unit = <OsImpl as Platform>::Unit;

    fn module_path(&self, _: ModuleHandle, out: &mut NativePath<Self::Unit>) -> Result<()> {
        #[cfg(unix)]
        let units: Vec<_> = {
            use std::os::unix::ffi::OsStrExt;
            self.0.as_os_str().as_bytes().to_vec()
        };
        #[cfg(windows)]
        let units: Vec<_> = {
            use std::os::windows::ffi::OsStrExt;
            self.0.as_os_str().encode_wide().collect()
        };
        out.clear();
        out.extend_from_slice(&units)
    }

    fn executable_path(&self, out: &mut NativePath<Self::Unit>) -> Result<()> {
        OsImpl.executable_path(out)
    }

    fn process_id(&self) -> u32 {
        OsImpl.process_id()
    }

    fn local_time(&self) -> Result<Timestamp> {
        OsImpl.local_time()
    }

    fn append(&self, path: &[Self::Unit], bytes: &[u8]) -> Result<()> {
        OsImpl.append(path, bytes)
    }
}

fn format_benchmark(c: &mut Criterion) {
    let at = OsImpl.local_time().unwrap();
    let mut record = Record::new();
    c.bench_function("modlog:format_record", |b| {
        b.iter(|| {
            format_record(
                &mut record,
                black_box(&at),
                "DllMain",
                "DLL_THREAD_ATTACH - New thread created",
            )
            .unwrap()
        })
    });
}

fn append_benchmark(c: &mut Criterion) {
    let dir = std::env::temp_dir().join(format!("modlog-bench-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let module = BenchModule(dir.join("bench.dll"));
    let anchor = 0u8;
    let logger = Logger::new(ModuleHandle::containing(&anchor), &module);

    c.bench_function("modlog:append_record", |b| {
        b.iter(|| logger.append_record("DllMain", "DLL_THREAD_ATTACH - New thread created"))
    });
    c.bench_function("modlog:append_process_record", |b| {
        b.iter(|| logger.append_process_record())
    });

    let _ = std::fs::remove_dir_all(&dir);
}

criterion_group!(benches, format_benchmark, append_benchmark);
criterion_main!(benches);
