//! HTML page for the animated map.
//!
//! Placeholders: `{{TITLE}}` (escaped text), `{{WIDTH}}`/`{{HEIGHT}}`
//! (canvas size in pixels), `{{GRADIENT}}` (CSS gradient of the color bar)
//! and `{{DATA}}` (JSON payload, `</` escaped).

pub(crate) const ANIMATION_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{TITLE}}</title>
    <style>
        body { margin: 0; background: white; font-family: system-ui, -apple-system, sans-serif; color: #2a3f5f; }
        .page { width: fit-content; margin: 0 auto; padding: 20px 60px 40px 60px; }
        h1 { margin: 0 0 16px 0; font-size: 18px; font-weight: 400; text-align: center; }
        .controls { display: flex; gap: 8px; margin-bottom: 12px; }
        .controls button {
            border: 1px solid #bec8d9;
            background: #f8f9fb;
            border-radius: 4px;
            padding: 4px 12px;
            font-size: 13px;
            cursor: pointer;
        }
        .controls button:hover { background: #e8ecf3; }
        .figure { display: flex; align-items: flex-start; gap: 16px; }
        .plot { position: relative; }
        #map { display: block; }
        .colorbar { display: flex; align-items: stretch; gap: 6px; }
        .colorbar .bar { width: 18px; border: 1px solid #999; background: {{GRADIENT}}; }
        .colorbar .ticks { position: relative; width: 28px; font-size: 12px; }
        .colorbar .ticks span { position: absolute; left: 0; transform: translateY(-50%); }
        .colorbar .label { writing-mode: vertical-rl; font-size: 13px; text-align: center; }
        .slider { margin-top: 12px; }
        .slider .current { font-size: 14px; text-align: center; margin-bottom: 6px; }
        .slider input { width: 100%; }
        #hover {
            position: absolute;
            display: none;
            pointer-events: none;
            background: rgba(255,255,255,0.95);
            border: 1px solid #444;
            padding: 4px 8px;
            font-size: 12px;
            line-height: 1.4;
            white-space: nowrap;
        }
    </style>
</head>
<body>
    <div class="page">
        <h1 id="title">{{TITLE}}</h1>
        <div class="controls">
            <button id="play">&#9654; Play</button>
            <button id="pause">&#9208; Pause</button>
        </div>
        <div class="figure">
            <div class="plot">
                <canvas id="map" width="{{WIDTH}}" height="{{HEIGHT}}"></canvas>
                <div id="hover"></div>
            </div>
            <div class="colorbar" id="colorbar">
                <div class="bar" id="colorbar-bar"></div>
                <div class="ticks" id="colorbar-ticks"></div>
                <div class="label">SST (&deg;C)</div>
            </div>
        </div>
        <div class="slider">
            <div class="current" id="current">Date: </div>
            <input type="range" id="slider" min="0" max="0" value="0" step="1">
        </div>
    </div>
    <script type="application/json" id="sst-data">{{DATA}}</script>
    <script>
    (function () {
        const D = JSON.parse(document.getElementById('sst-data').textContent);
        const nlat = D.lats.length;
        const nlon = D.lons.length;
        const nframes = D.labels.length;

        const canvas = document.getElementById('map');
        const ctx = canvas.getContext('2d');
        const M = { l: 60, r: 20, t: 20, b: 50 };
        const pw = canvas.width - M.l - M.r;
        const ph = canvas.height - M.t - M.b;
        const x = lon => M.l + (lon - D.lonRange[0]) / (D.lonRange[1] - D.lonRange[0]) * pw;
        const y = lat => M.t + (D.latRange[1] - lat) / (D.latRange[1] - D.latRange[0]) * ph;
        const lonAt = px => D.lonRange[0] + (px - M.l) / pw * (D.lonRange[1] - D.lonRange[0]);
        const latAt = py => D.latRange[1] - (py - M.t) / ph * (D.latRange[1] - D.latRange[0]);

        const off = document.createElement('canvas');
        off.width = nlon;
        off.height = nlat;
        const octx = off.getContext('2d');
        const image = octx.createImageData(nlon, nlat);

        const title = document.getElementById('title');
        const current = document.getElementById('current');
        const slider = document.getElementById('slider');
        const hover = document.getElementById('hover');
        slider.max = String(nframes - 1);

        let index = 0;
        let codes = new Uint8Array(nlat * nlon);
        let timer = null;

        function decode(hex) {
            const out = new Uint8Array(hex.length / 2);
            for (let k = 0; k < out.length; k++) {
                out[k] = parseInt(hex.substr(2 * k, 2), 16);
            }
            return out;
        }

        function drawAxes() {
            ctx.strokeStyle = 'rgba(128,128,128,0.3)';
            ctx.lineWidth = 1;
            ctx.fillStyle = '#2a3f5f';
            ctx.font = '12px system-ui, sans-serif';

            ctx.textAlign = 'center';
            ctx.textBaseline = 'top';
            for (let lon = D.lonRange[0]; lon <= D.lonRange[1] + 1e-9; lon += D.lonTick) {
                const px = Math.round(x(lon)) + 0.5;
                ctx.beginPath();
                ctx.moveTo(px, M.t);
                ctx.lineTo(px, M.t + ph);
                ctx.stroke();
                ctx.fillText(String(lon), px, M.t + ph + 6);
            }
            ctx.fillText('Longitude', M.l + pw / 2, M.t + ph + 26);

            ctx.textAlign = 'right';
            ctx.textBaseline = 'middle';
            for (let lat = D.latRange[0]; lat <= D.latRange[1] + 1e-9; lat += D.latTick) {
                const py = Math.round(y(lat)) + 0.5;
                ctx.beginPath();
                ctx.moveTo(M.l, py);
                ctx.lineTo(M.l + pw, py);
                ctx.stroke();
                ctx.fillText(String(lat), M.l - 6, py);
            }
            ctx.save();
            ctx.translate(16, M.t + ph / 2);
            ctx.rotate(-Math.PI / 2);
            ctx.textAlign = 'center';
            ctx.fillText('Latitude', 0, 0);
            ctx.restore();
        }

        function draw(i) {
            index = i;
            codes = decode(D.frames[i]);
            const px = image.data;
            for (let k = 0; k < codes.length; k++) {
                const c = D.palette[codes[k]];
                px[4 * k] = c[0];
                px[4 * k + 1] = c[1];
                px[4 * k + 2] = c[2];
                px[4 * k + 3] = c[3];
            }
            octx.putImageData(image, 0, 0);

            ctx.clearRect(0, 0, canvas.width, canvas.height);
            ctx.fillStyle = D.background;
            ctx.fillRect(M.l, M.t, pw, ph);

            ctx.save();
            ctx.beginPath();
            ctx.rect(M.l, M.t, pw, ph);
            ctx.clip();
            ctx.imageSmoothingEnabled = false;
            const b = D.bounds;
            ctx.drawImage(off, x(b.west), y(b.north), x(b.east) - x(b.west), y(b.south) - y(b.north));
            ctx.restore();

            drawAxes();

            const label = D.labels[i];
            title.textContent = D.titlePrefix + ' (' + label + ')';
            current.textContent = 'Date: ' + label;
            slider.value = String(i);
        }

        function play() {
            if (timer !== null) return;
            if (index >= nframes - 1) draw(0);
            timer = setInterval(function () {
                if (index >= nframes - 1) {
                    pause();
                    return;
                }
                draw(index + 1);
            }, D.frameMs);
        }

        function pause() {
            if (timer !== null) {
                clearInterval(timer);
                timer = null;
            }
        }

        function colorbar() {
            const bar = document.getElementById('colorbar-bar');
            const ticks = document.getElementById('colorbar-ticks');
            bar.style.marginTop = M.t + 'px';
            bar.style.height = ph + 'px';
            ticks.style.marginTop = M.t + 'px';
            ticks.style.height = ph + 'px';
            const first = Math.ceil(D.min / 5) * 5;
            for (let v = first; v <= D.max; v += 5) {
                const span = document.createElement('span');
                span.textContent = String(v);
                span.style.top = ((D.max - v) / (D.max - D.min) * ph) + 'px';
                ticks.appendChild(span);
            }
        }

        canvas.addEventListener('mousemove', function (ev) {
            const rect = canvas.getBoundingClientRect();
            const cx = (ev.clientX - rect.left) * canvas.width / rect.width;
            const cy = (ev.clientY - rect.top) * canvas.height / rect.height;
            const b = D.bounds;
            const lon = lonAt(cx);
            const lat = latAt(cy);
            const col = Math.floor((lon - b.west) / (b.east - b.west) * nlon);
            const row = Math.floor((b.north - lat) / (b.north - b.south) * nlat);
            if (cx < M.l || cx > M.l + pw || cy < M.t || cy > M.t + ph ||
                col < 0 || col >= nlon || row < 0 || row >= nlat) {
                hover.style.display = 'none';
                return;
            }
            const code = codes[row * nlon + col];
            const readout = D.readouts[code];
            if (code === D.nodata || readout === null) {
                hover.style.display = 'none';
                return;
            }
            hover.innerHTML = 'Lon: ' + D.lons[col].toFixed(1) + '&deg;<br>' +
                'Lat: ' + D.lats[row].toFixed(1) + '&deg;<br>' +
                'SST: ' + readout;
            hover.style.left = (ev.clientX - rect.left + 12) + 'px';
            hover.style.top = (ev.clientY - rect.top + 12) + 'px';
            hover.style.display = 'block';
        });
        canvas.addEventListener('mouseleave', function () {
            hover.style.display = 'none';
        });

        document.getElementById('play').addEventListener('click', play);
        document.getElementById('pause').addEventListener('click', pause);
        slider.addEventListener('input', function () {
            pause();
            draw(parseInt(slider.value, 10));
        });

        colorbar();
        draw(0);
    })();
    </script>
</body>
</html>
"#;
